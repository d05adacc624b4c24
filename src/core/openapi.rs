use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::photos::{dtos as photos_dtos, handlers as photos_handlers, models as photos_models};
use crate::features::storage::{dtos as storage_dtos, handlers as storage_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Photos
        photos_handlers::list_photos,
        // Comments
        photos_handlers::list_comments,
        photos_handlers::create_comment,
        photos_handlers::delete_comment,
        // Favorites
        photos_handlers::add_favorite,
        photos_handlers::remove_favorite,
        // Storage
        storage_handlers::list_storage,
        storage_handlers::presign_upload,
        storage_handlers::presign_download,
        storage_handlers::complete_upload,
    ),
    components(
        schemas(
            // Shared
            Meta,
            auth::model::AuthenticatedUser,
            // Photos
            photos_models::PhotoStatus,
            photos_dtos::GroupBy,
            photos_dtos::PhotoItemDto,
            photos_dtos::ListPhotosResponseDto,
            ApiResponse<photos_dtos::ListPhotosResponseDto>,
            // Comments
            photos_dtos::CreateCommentDto,
            photos_dtos::CommentResponseDto,
            photos_dtos::OkResponseDto,
            ApiResponse<Vec<photos_dtos::CommentResponseDto>>,
            ApiResponse<photos_dtos::CommentResponseDto>,
            ApiResponse<photos_dtos::OkResponseDto>,
            // Storage
            storage_dtos::PresignUploadDto,
            storage_dtos::PresignUploadResponseDto,
            storage_dtos::PresignDownloadResponseDto,
            storage_dtos::CompleteUploadDto,
            storage_dtos::CompleteResponseDto,
            storage_dtos::StorageObjectDto,
            storage_dtos::ListStorageResponseDto,
            ApiResponse<storage_dtos::PresignUploadResponseDto>,
            ApiResponse<storage_dtos::PresignDownloadResponseDto>,
            ApiResponse<storage_dtos::CompleteResponseDto>,
            ApiResponse<storage_dtos::ListStorageResponseDto>,
        )
    ),
    tags(
        (name = "photos", description = "Cursor-paginated, date-grouped photo listing"),
        (name = "comments", description = "Comments on photos"),
        (name = "favorites", description = "Idempotent photo favorites"),
        (name = "storage", description = "Presigned uploads, completion, and the storage browser"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Fotostream API",
        version = "0.1.0",
        description = "API documentation for Fotostream",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
