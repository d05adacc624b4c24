use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::photos::handlers::{self, PhotoState};
use crate::features::photos::services::{CommentService, FavoriteService, PhotoService};

/// Create routes for the photos feature
///
/// All routes require authentication (applied by the caller)
pub fn routes(
    photo_service: Arc<PhotoService>,
    comment_service: Arc<CommentService>,
    favorite_service: Arc<FavoriteService>,
) -> Router {
    let state = PhotoState {
        photo_service,
        comment_service,
        favorite_service,
    };

    Router::new()
        .route("/api/photos", get(handlers::list_photos))
        .route(
            "/api/photos/{photo_id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/api/photos/{photo_id}/comments/{comment_id}",
            delete(handlers::delete_comment),
        )
        .route(
            "/api/photos/{photo_id}/favorite",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .with_state(state)
}
