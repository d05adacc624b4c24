use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::storage::dtos::{
    CompleteQuery, CompleteResponseDto, CompleteUploadDto, ListStorageQuery,
    ListStorageResponseDto, PresignDownloadQuery, PresignDownloadResponseDto, PresignUploadDto,
    PresignUploadResponseDto,
};
use crate::features::storage::services::UploadService;
use crate::shared::types::ApiResponse;

/// Issue a presigned upload URL
///
/// The client PUTs the object bytes directly to storage with the returned
/// URL, then registers the upload via `/api/storage/complete`.
#[utoipa::path(
    post,
    path = "/api/storage/presign/upload",
    request_body = PresignUploadDto,
    responses(
        (status = 200, description = "Presigned upload URL", body = ApiResponse<PresignUploadResponseDto>),
        (status = 400, description = "Missing content type"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "storage"
)]
pub async fn presign_upload(
    _user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    AppJson(dto): AppJson<PresignUploadDto>,
) -> Result<Json<ApiResponse<PresignUploadResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.presign_upload(&dto).await?;

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Issue a presigned download URL for an object
#[utoipa::path(
    get,
    path = "/api/storage/presign/download",
    params(PresignDownloadQuery),
    responses(
        (status = 200, description = "Presigned download URL", body = ApiResponse<PresignDownloadResponseDto>),
        (status = 400, description = "Missing key"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "storage"
)]
pub async fn presign_download(
    _user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    Query(query): Query<PresignDownloadQuery>,
) -> Result<Json<ApiResponse<PresignDownloadResponseDto>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.presign_download(&query.key).await?;

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Register an uploaded object as a photo
///
/// Fails with 404 (and writes nothing) when the object does not exist in
/// storage. Returns the fully shaped photo item, with a preview URL unless
/// `presign=false`.
#[utoipa::path(
    post,
    path = "/api/storage/complete",
    params(CompleteQuery),
    request_body = CompleteUploadDto,
    responses(
        (status = 201, description = "Photo registered", body = ApiResponse<CompleteResponseDto>),
        (status = 400, description = "Invalid body or query parameters"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Object not found in storage"),
        (status = 409, description = "Object key already registered")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "storage"
)]
pub async fn complete_upload(
    user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    Query(query): Query<CompleteQuery>,
    AppJson(dto): AppJson<CompleteUploadDto>,
) -> Result<(StatusCode, Json<ApiResponse<CompleteResponseDto>>)> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service
        .complete(&user.sub, &dto, query.presign, query.ttl)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(CompleteResponseDto { item }),
            None,
            None,
        )),
    ))
}

/// List raw stored objects
#[utoipa::path(
    get,
    path = "/api/storage",
    params(ListStorageQuery),
    responses(
        (status = 200, description = "One page of stored objects", body = ApiResponse<ListStorageResponseDto>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "storage"
)]
pub async fn list_storage(
    _user: AuthenticatedUser,
    State(service): State<Arc<UploadService>>,
    Query(query): Query<ListStorageQuery>,
) -> Result<Json<ApiResponse<ListStorageResponseDto>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.list_objects(&query).await?;

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
