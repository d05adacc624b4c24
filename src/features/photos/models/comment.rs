use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for photo comments
#[derive(Debug, Clone, FromRow)]
pub struct PhotoComment {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
