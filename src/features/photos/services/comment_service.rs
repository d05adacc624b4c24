use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::normalize_comment_body;
use crate::features::photos::models::PhotoComment;
use crate::shared::constants::COMMENT_PAGE_SIZE;

/// Service for photo comments
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a photo's comments, oldest first
    pub async fn list(&self, photo_id: Uuid) -> Result<Vec<PhotoComment>> {
        let comments = sqlx::query_as::<_, PhotoComment>(
            r#"
            SELECT id, photo_id, author_id, body, created_at
            FROM photo_comments
            WHERE photo_id = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(photo_id)
        .bind(COMMENT_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Create a comment on a photo. The body is trimmed and bounded before
    /// anything touches the database.
    pub async fn create(&self, photo_id: Uuid, author_id: &str, body: &str) -> Result<PhotoComment> {
        let body = normalize_comment_body(body)?;

        let photo_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM photos WHERE id = $1)")
                .bind(photo_id)
                .fetch_one(&self.pool)
                .await?;

        if !photo_exists {
            return Err(AppError::NotFound("Photo not found".to_string()));
        }

        let comment = sqlx::query_as::<_, PhotoComment>(
            r#"
            INSERT INTO photo_comments (id, photo_id, author_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, photo_id, author_id, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(photo_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Created comment {} on photo {} by {}",
            comment.id, photo_id, author_id
        );

        Ok(comment)
    }

    /// Delete a comment. Only the author may delete their own comment.
    pub async fn delete(&self, photo_id: Uuid, comment_id: Uuid, user_id: &str) -> Result<()> {
        let comment = sqlx::query_as::<_, PhotoComment>(
            "SELECT id, photo_id, author_id, body, created_at FROM photo_comments WHERE id = $1",
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        let comment = match comment {
            Some(c) if c.photo_id == photo_id => c,
            _ => return Err(AppError::NotFound("Comment not found".to_string())),
        };

        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "You can only delete your own comments".to_string(),
            ));
        }

        sqlx::query("DELETE FROM photo_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        info!("Deleted comment {} on photo {}", comment_id, photo_id);

        Ok(())
    }
}
