use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::PhotoItemDto;
use crate::features::photos::services::PhotoService;
use crate::features::processing::services::AnalysisJobService;
use crate::features::storage::dtos::{
    ext_from_content_type, CompleteUploadDto, ListStorageQuery, ListStorageResponseDto,
    PresignDownloadResponseDto, PresignUploadDto, PresignUploadResponseDto, StorageObjectDto,
};
use crate::modules::storage::MinIOClient;
use crate::shared::concurrency::map_bounded;
use crate::shared::constants::PRESIGN_CONCURRENCY;
use crate::shared::validation::is_image_key;

/// Orchestrates presigned uploads and their completion
pub struct UploadService {
    pool: PgPool,
    minio: Arc<MinIOClient>,
    photo_service: Arc<PhotoService>,
    job_service: Arc<AnalysisJobService>,
}

impl UploadService {
    pub fn new(
        pool: PgPool,
        minio: Arc<MinIOClient>,
        photo_service: Arc<PhotoService>,
        job_service: Arc<AnalysisJobService>,
    ) -> Self {
        Self {
            pool,
            minio,
            photo_service,
            job_service,
        }
    }

    /// Issue a presigned PUT URL (plus a GET preview URL) for a new upload
    pub async fn presign_upload(&self, dto: &PresignUploadDto) -> Result<PresignUploadResponseDto> {
        let key = match &dto.key {
            Some(key) => key.clone(),
            None => self
                .minio
                .generate_upload_key(ext_from_content_type(&dto.content_type)),
        };

        let expires_in = self.minio.default_presign_expiry_secs();
        let url = self.minio.presign_put(&key, expires_in).await?;
        let preview_url = self.minio.presign_get(&key, expires_in).await?;

        Ok(PresignUploadResponseDto {
            key,
            url,
            preview_url,
            expires_in,
        })
    }

    /// Issue a presigned GET URL for an existing object
    pub async fn presign_download(&self, key: &str) -> Result<PresignDownloadResponseDto> {
        let expires_in = self.minio.default_presign_expiry_secs();
        let url = self.minio.presign_get(key, expires_in).await?;

        Ok(PresignDownloadResponseDto {
            key: key.to_string(),
            url,
            expires_in,
        })
    }

    /// Register an uploaded object as a photo record.
    ///
    /// The existence check runs before any database write so a record can
    /// never reference an object that was not actually uploaded. The analysis
    /// enqueue is best-effort; the created record stands even when it fails.
    pub async fn complete(
        &self,
        user_id: &str,
        dto: &CompleteUploadDto,
        presign: bool,
        ttl: u32,
    ) -> Result<PhotoItemDto> {
        if !self.minio.exists(&dto.key).await? {
            return Err(AppError::NotFound(format!("No such object: {}", dto.key)));
        }

        // Capture-time hint wins over ingestion time so the photo sorts and
        // groups by when it was taken.
        let created_at = dto
            .exif_hint
            .as_ref()
            .and_then(|hint| hint.get("taken_at"))
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        let exif_json = match &dto.exif_hint {
            Some(hint) => Some(
                serde_json::to_value(hint)
                    .map_err(|e| AppError::Internal(format!("Failed to encode exif hint: {}", e)))?,
            ),
            None => None,
        };

        let photo_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO photos (id, owner_id, object_key, mime, bytes, sha256, exif_json, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(photo_id)
        .bind(user_id)
        .bind(&dto.key)
        .bind(&dto.mime)
        .bind(dto.bytes)
        .bind(&dto.sha256)
        .bind(exif_json)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Object key already registered: {}", dto.key))
            }
            _ => AppError::Database(e),
        })?;

        info!(
            "Photo {} registered for object '{}' by {}",
            photo_id, dto.key, user_id
        );

        // Best-effort: a processing outage must not fail the upload.
        if let Err(e) = self.job_service.enqueue(photo_id).await {
            warn!(
                "Failed to enqueue analysis job for photo {}: {}",
                photo_id, e
            );
        }

        self.photo_service
            .get_item(user_id, photo_id, presign, ttl)
            .await
    }

    /// List raw stored objects, optionally presigning previews
    pub async fn list_objects(&self, query: &ListStorageQuery) -> Result<ListStorageResponseDto> {
        let page = self
            .minio
            .list(
                query.prefix.clone(),
                query.token.clone(),
                Some(query.limit as usize),
            )
            .await?;

        let next_token = page.next_token;

        let items = if query.presign {
            let minio = &self.minio;
            let only_images = query.only_images;
            let ttl = query.ttl;

            map_bounded(page.objects, PRESIGN_CONCURRENCY, |_, obj| async move {
                let preview_url = if !only_images || is_image_key(&obj.key) {
                    Some(minio.presign_get(&obj.key, ttl).await?)
                } else {
                    None
                };
                Ok::<_, AppError>(StorageObjectDto {
                    key: obj.key,
                    size: obj.size as i64,
                    last_modified: obj.last_modified,
                    preview_url,
                })
            })
            .await?
        } else {
            page.objects
                .into_iter()
                .map(|obj| StorageObjectDto {
                    key: obj.key,
                    size: obj.size as i64,
                    last_modified: obj.last_modified,
                    preview_url: None,
                })
                .collect()
        };

        Ok(ListStorageResponseDto {
            items,
            next_token,
            prefix: query.prefix.clone(),
            limit: query.limit,
        })
    }
}
