use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::photos::dtos::{CommentResponseDto, CreateCommentDto, OkResponseDto};
use crate::features::photos::handlers::PhotoState;
use crate::shared::types::{ApiResponse, Meta};

/// List a photo's comments, oldest first
#[utoipa::path(
    get,
    path = "/api/photos/{photo_id}/comments",
    params(
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    responses(
        (status = 200, description = "Comments for the photo", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn list_comments(
    _user: AuthenticatedUser,
    State(state): State<PhotoState>,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = state.comment_service.list(photo_id).await?;
    let total = comments.len() as i64;
    let items: Vec<CommentResponseDto> = comments.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Create a comment on a photo
#[utoipa::path(
    post,
    path = "/api/photos/{photo_id}/comments",
    params(
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Empty or oversized body"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Photo not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn create_comment(
    user: AuthenticatedUser,
    State(state): State<PhotoState>,
    Path(photo_id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    let comment = state
        .comment_service
        .create(photo_id, &user.sub, &dto.body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment.into()), None, None)),
    ))
}

/// Delete one of the caller's own comments
#[utoipa::path(
    delete,
    path = "/api/photos/{photo_id}/comments/{comment_id}",
    params(
        ("photo_id" = Uuid, Path, description = "Photo id"),
        ("comment_id" = Uuid, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = ApiResponse<OkResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the comment author"),
        (status = 404, description = "Comment not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(state): State<PhotoState>,
    Path((photo_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<OkResponseDto>>> {
    state
        .comment_service
        .delete(photo_id, comment_id, &user.sub)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(OkResponseDto { ok: true }),
        None,
        None,
    )))
}
