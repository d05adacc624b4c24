use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::{
    group_items, ListPhotosQuery, ListPhotosResponseDto, PhotoItemDto,
};
use crate::features::photos::models::PhotoWithStats;
use crate::modules::storage::MinIOClient;
use crate::shared::concurrency::map_bounded;
use crate::shared::constants::PRESIGN_CONCURRENCY;
use crate::shared::validation::is_image_key;

/// Orchestrates the photo listing: ownership-scoped page fetch, preview
/// enrichment, shaping, and temporal grouping.
pub struct PhotoService {
    pool: PgPool,
    minio: Arc<MinIOClient>,
}

impl PhotoService {
    pub fn new(pool: PgPool, minio: Arc<MinIOClient>) -> Self {
        Self { pool, minio }
    }

    /// List the caller's photos, newest first, grouped by temporal key.
    ///
    /// The ownership filter is part of every query here; rows belonging to
    /// other identities are unreachable through this service.
    pub async fn list(&self, user_id: &str, query: &ListPhotosQuery) -> Result<ListPhotosResponseDto> {
        let rows = self.fetch_page(user_id, query.take, query.cursor).await?;

        // Computed on the ungrouped page: a full page means there may be more.
        let next_cursor = if rows.len() as i64 == query.take {
            rows.last().map(|row| row.id)
        } else {
            None
        };

        let items = self.enrich(rows, query.presign, query.ttl).await?;
        let grouped = group_items(items, query.group);

        Ok(ListPhotosResponseDto {
            grouped,
            next_cursor,
        })
    }

    /// Fetch one photo owned by `user_id`, shaped like a listing item.
    /// Used by upload completion so both paths share one shaping routine.
    pub async fn get_item(
        &self,
        user_id: &str,
        photo_id: Uuid,
        presign: bool,
        ttl: u32,
    ) -> Result<PhotoItemDto> {
        let row = sqlx::query_as::<_, PhotoWithStats>(
            r#"
            SELECT p.id, p.object_key, p.mime, p.bytes, p.width, p.height,
                   p.exif_json, p.status, p.created_at,
                   (SELECT COUNT(*) FROM photo_comments c WHERE c.photo_id = p.id) AS comment_count,
                   (SELECT COUNT(*) FROM photo_favorites f WHERE f.photo_id = p.id) AS favorite_count,
                   EXISTS (
                       SELECT 1 FROM photo_favorites f
                       WHERE f.photo_id = p.id AND f.user_id = $1
                   ) AS is_favorited
            FROM photos p
            WHERE p.id = $2 AND p.owner_id = $1
            "#,
        )
        .bind(user_id)
        .bind(photo_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

        let mut items = self.enrich(vec![row], presign, ttl).await?;
        items
            .pop()
            .ok_or_else(|| AppError::Internal("Enrichment returned no item".to_string()))
    }

    /// Fetch one page ordered by (created_at desc, id desc). The composite
    /// order is total even when timestamps collide, so cursoring never skips
    /// or repeats rows.
    async fn fetch_page(
        &self,
        user_id: &str,
        take: i64,
        cursor: Option<Uuid>,
    ) -> Result<Vec<PhotoWithStats>> {
        match cursor {
            Some(cursor_id) => {
                let cursor_created_at: Option<DateTime<Utc>> = sqlx::query_scalar(
                    "SELECT created_at FROM photos WHERE id = $1 AND owner_id = $2",
                )
                .bind(cursor_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

                let cursor_created_at = cursor_created_at
                    .ok_or_else(|| AppError::BadRequest("Unknown cursor".to_string()))?;

                let rows = sqlx::query_as::<_, PhotoWithStats>(
                    r#"
                    SELECT p.id, p.object_key, p.mime, p.bytes, p.width, p.height,
                           p.exif_json, p.status, p.created_at,
                           (SELECT COUNT(*) FROM photo_comments c WHERE c.photo_id = p.id) AS comment_count,
                           (SELECT COUNT(*) FROM photo_favorites f WHERE f.photo_id = p.id) AS favorite_count,
                           EXISTS (
                               SELECT 1 FROM photo_favorites f
                               WHERE f.photo_id = p.id AND f.user_id = $1
                           ) AS is_favorited
                    FROM photos p
                    WHERE p.owner_id = $1
                      AND (p.created_at, p.id) < ($3, $4)
                    ORDER BY p.created_at DESC, p.id DESC
                    LIMIT $2
                    "#,
                )
                .bind(user_id)
                .bind(take)
                .bind(cursor_created_at)
                .bind(cursor_id)
                .fetch_all(&self.pool)
                .await?;

                Ok(rows)
            }
            None => {
                let rows = sqlx::query_as::<_, PhotoWithStats>(
                    r#"
                    SELECT p.id, p.object_key, p.mime, p.bytes, p.width, p.height,
                           p.exif_json, p.status, p.created_at,
                           (SELECT COUNT(*) FROM photo_comments c WHERE c.photo_id = p.id) AS comment_count,
                           (SELECT COUNT(*) FROM photo_favorites f WHERE f.photo_id = p.id) AS favorite_count,
                           EXISTS (
                               SELECT 1 FROM photo_favorites f
                               WHERE f.photo_id = p.id AND f.user_id = $1
                           ) AS is_favorited
                    FROM photos p
                    WHERE p.owner_id = $1
                    ORDER BY p.created_at DESC, p.id DESC
                    LIMIT $2
                    "#,
                )
                .bind(user_id)
                .bind(take)
                .fetch_all(&self.pool)
                .await?;

                Ok(rows)
            }
        }
    }

    /// Shape rows into wire items, presigning preview URLs for image keys
    /// with a bounded number of signing calls in flight.
    async fn enrich(
        &self,
        rows: Vec<PhotoWithStats>,
        presign: bool,
        ttl: u32,
    ) -> Result<Vec<PhotoItemDto>> {
        let minio = &self.minio;

        map_bounded(rows, PRESIGN_CONCURRENCY, |_, row| async move {
            let preview_url = if presign && is_image_key(&row.object_key) {
                Some(minio.presign_get(&row.object_key, ttl).await?)
            } else {
                None
            };
            Ok(PhotoItemDto::from_stats(row, preview_url))
        })
        .await
    }
}
