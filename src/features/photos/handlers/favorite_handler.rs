use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::photos::dtos::OkResponseDto;
use crate::features::photos::handlers::PhotoState;
use crate::shared::types::ApiResponse;

/// Favorite a photo (idempotent)
#[utoipa::path(
    post,
    path = "/api/photos/{photo_id}/favorite",
    params(
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    responses(
        (status = 200, description = "Favorite recorded", body = ApiResponse<OkResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Photo not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "favorites"
)]
pub async fn add_favorite(
    user: AuthenticatedUser,
    State(state): State<PhotoState>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OkResponseDto>>> {
    state.favorite_service.add(photo_id, &user.sub).await?;

    Ok(Json(ApiResponse::success(
        Some(OkResponseDto { ok: true }),
        None,
        None,
    )))
}

/// Remove a favorite (idempotent)
#[utoipa::path(
    delete,
    path = "/api/photos/{photo_id}/favorite",
    params(
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    responses(
        (status = 200, description = "Favorite removed", body = ApiResponse<OkResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Photo not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "favorites"
)]
pub async fn remove_favorite(
    user: AuthenticatedUser,
    State(state): State<PhotoState>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OkResponseDto>>> {
    state.favorite_service.remove(photo_id, &user.sub).await?;

    Ok(Json(ApiResponse::success(
        Some(OkResponseDto { ok: true }),
        None,
        None,
    )))
}
