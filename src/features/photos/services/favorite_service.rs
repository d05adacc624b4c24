use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Service for photo favorites
///
/// Both operations are idempotent: the composite primary key plus
/// `ON CONFLICT DO NOTHING` makes repeated adds a no-op, and removal of an
/// absent relation succeeds without error. Concurrent toggles on the same
/// (photo, user) pair are arbitrated by the database, not by this service.
pub struct FavoriteService {
    pool: PgPool,
}

impl FavoriteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark a photo as favorited by a user (upsert)
    pub async fn add(&self, photo_id: Uuid, user_id: &str) -> Result<()> {
        self.ensure_photo_exists(photo_id).await?;

        sqlx::query(
            r#"
            INSERT INTO photo_favorites (photo_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (photo_id, user_id) DO NOTHING
            "#,
        )
        .bind(photo_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        debug!("Favorite added: photo={} user={}", photo_id, user_id);

        Ok(())
    }

    /// Remove a user's favorite from a photo (delete-if-exists)
    pub async fn remove(&self, photo_id: Uuid, user_id: &str) -> Result<()> {
        self.ensure_photo_exists(photo_id).await?;

        sqlx::query("DELETE FROM photo_favorites WHERE photo_id = $1 AND user_id = $2")
            .bind(photo_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!("Favorite removed: photo={} user={}", photo_id, user_id);

        Ok(())
    }

    async fn ensure_photo_exists(&self, photo_id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM photos WHERE id = $1)")
                .bind(photo_id)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound("Photo not found".to_string()))
        }
    }
}
