use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a photo record.
///
/// Records start as `uploaded`; the analysis worker moves them to `ready`
/// once the object has been re-verified, or `failed` when it is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "photo_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum PhotoStatus {
    Uploaded,
    Ready,
    Failed,
}

/// Database model for photos
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Photo {
    pub id: Uuid,
    pub owner_id: String,
    pub object_key: String,
    pub mime: String,
    pub bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub sha256: Option<String>,
    pub exif_json: Option<serde_json::Value>,
    pub status: PhotoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A photo row joined with its aggregate counts and the requesting user's
/// favorite flag, as produced by the listing query.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoWithStats {
    pub id: Uuid,
    pub object_key: String,
    pub mime: String,
    pub bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub exif_json: Option<serde_json::Value>,
    pub status: PhotoStatus,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
    pub favorite_count: i64,
    pub is_favorited: bool,
}
