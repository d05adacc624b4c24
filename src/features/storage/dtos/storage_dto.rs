use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::photos::dtos::PhotoItemDto;
use crate::shared::constants::{DEFAULT_LIST_LIMIT, DEFAULT_PRESIGN_TTL};

/// Map an upload content type to the object key extension.
/// Unknown types fall back to "bin"; the image allow-list at presign time
/// decides whether such keys ever get preview URLs.
pub fn ext_from_content_type(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        "image/heif" => "heif",
        _ => "bin",
    }
}

/// Request DTO for a presigned upload URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadDto {
    /// MIME type the client will upload
    #[validate(length(min = 1, message = "contentType is required"))]
    pub content_type: String,
    /// Explicit object key; generated from the content type when absent
    #[validate(length(min = 1, message = "key must not be empty"))]
    pub key: Option<String>,
}

/// Response DTO for a presigned upload URL
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadResponseDto {
    pub key: String,
    /// PUT URL the client uploads the object to
    pub url: String,
    /// GET URL for previewing the object after upload
    pub preview_url: String,
    /// Lifetime of both URLs in seconds
    pub expires_in: u32,
}

/// Query params for a presigned download URL
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct PresignDownloadQuery {
    #[validate(length(min = 1, message = "key is required"))]
    pub key: String,
}

/// Response DTO for a presigned download URL
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignDownloadResponseDto {
    pub key: String,
    pub url: String,
    pub expires_in: u32,
}

/// Request DTO for registering an uploaded object as a photo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadDto {
    #[validate(length(min = 1, message = "key is required"))]
    pub key: String,
    #[validate(length(min = 1, message = "mime is required"))]
    pub mime: String,
    #[validate(range(min = 1, message = "bytes must be positive"))]
    pub bytes: i64,
    /// Optional content hash, stored for duplicate detection
    pub sha256: Option<String>,
    /// Optional metadata hints; `taken_at` (RFC 3339) overrides the record's
    /// created_at so ordering reflects capture time rather than ingestion
    pub exif_hint: Option<HashMap<String, String>>,
}

/// Query params gating preview generation on completion
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct CompleteQuery {
    /// Whether to presign a preview URL for the returned item (default true)
    #[serde(default = "default_presign")]
    pub presign: bool,

    /// Preview URL lifetime in seconds (60-3600, default 300)
    #[serde(default = "default_ttl")]
    #[validate(range(min = 60, max = 3600))]
    #[param(minimum = 60, maximum = 3600)]
    pub ttl: u32,
}

fn default_presign() -> bool {
    true
}

fn default_ttl() -> u32 {
    DEFAULT_PRESIGN_TTL
}

/// Response DTO for upload completion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompleteResponseDto {
    pub item: PhotoItemDto,
}

/// Query params for the storage browser listing
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListStorageQuery {
    /// Key prefix to list under
    pub prefix: Option<String>,

    /// Objects per page (1-1000, default 100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    #[param(minimum = 1, maximum = 1000)]
    pub limit: i64,

    /// Continuation token from the previous page
    pub token: Option<String>,

    /// Whether to presign preview URLs (default false)
    #[serde(default)]
    pub presign: bool,

    /// Preview URL lifetime in seconds (60-3600, default 300)
    #[serde(default = "default_ttl")]
    #[validate(range(min = 60, max = 3600))]
    #[param(minimum = 60, maximum = 3600)]
    pub ttl: u32,

    /// Restrict presigning to image keys (default true)
    #[serde(default = "default_only_images")]
    pub only_images: bool,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

fn default_only_images() -> bool {
    true
}

/// One raw stored object in a storage browser page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectDto {
    pub key: String,
    pub size: i64,
    pub last_modified: String,
    pub preview_url: Option<String>,
}

/// Response DTO for the storage browser listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListStorageResponseDto {
    pub items: Vec<StorageObjectDto>,
    pub next_token: Option<String>,
    pub prefix: Option<String>,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ext_from_known_content_types() {
        assert_eq!(ext_from_content_type("image/jpeg"), "jpg");
        assert_eq!(ext_from_content_type("image/jpg"), "jpg");
        assert_eq!(ext_from_content_type("image/png"), "png");
        assert_eq!(ext_from_content_type("image/webp"), "webp");
        assert_eq!(ext_from_content_type("image/heic"), "heic");
        assert_eq!(ext_from_content_type("image/heif"), "heif");
    }

    #[test]
    fn test_ext_falls_back_to_bin() {
        assert_eq!(ext_from_content_type("video/mp4"), "bin");
        assert_eq!(ext_from_content_type("application/pdf"), "bin");
        assert_eq!(ext_from_content_type(""), "bin");
    }

    #[test]
    fn test_complete_dto_bounds() {
        let dto = CompleteUploadDto {
            key: "photos/a.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: 0,
            sha256: None,
            exif_hint: None,
        };
        assert!(dto.validate().is_err());

        let dto = CompleteUploadDto { bytes: 1, ..dto };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListStorageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.limit, 100);
        assert!(!query.presign);
        assert!(query.only_images);
        assert_eq!(query.ttl, 300);
        assert!(query.validate().is_ok());

        let query: ListStorageQuery =
            serde_json::from_value(serde_json::json!({"limit": 1001})).unwrap();
        assert!(query.validate().is_err());
    }
}
