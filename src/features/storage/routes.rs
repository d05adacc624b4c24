use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::storage::handlers;
use crate::features::storage::services::UploadService;

/// Create routes for the storage feature
///
/// All routes require authentication (applied by the caller)
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route("/api/storage", get(handlers::list_storage))
        .route(
            "/api/storage/presign/upload",
            post(handlers::presign_upload),
        )
        .route(
            "/api/storage/presign/download",
            get(handlers::presign_download),
        )
        .route("/api/storage/complete", post(handlers::complete_upload))
        .with_state(upload_service)
}
