use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::core::error::{AppError, Result};
use crate::features::photos::models::Photo;
use crate::features::processing::models::AnalysisJob;
use crate::features::processing::services::AnalysisJobService;
use crate::modules::storage::MinIOClient;

/// Maximum retry attempts for failed jobs
const MAX_RETRIES: i32 = 3;

/// Delay between processing batches
const BATCH_INTERVAL_SECS: u64 = 30;

/// Batch size for processing
const BATCH_SIZE: i64 = 10;

/// Background worker that settles freshly uploaded photos.
///
/// For each queued job the worker re-verifies the object in storage and
/// moves the photo from `uploaded` to `ready`, or to `failed` when the
/// object has disappeared since completion. Request handlers never wait on
/// this loop.
pub struct PhotoProcessor {
    pool: PgPool,
    job_service: Arc<AnalysisJobService>,
    minio: Arc<MinIOClient>,
}

impl PhotoProcessor {
    pub fn new(pool: PgPool, job_service: Arc<AnalysisJobService>, minio: Arc<MinIOClient>) -> Self {
        Self {
            pool,
            job_service,
            minio,
        }
    }

    /// Run the processor in a background loop
    pub async fn run(&self) {
        tracing::info!("Starting photo processor worker");

        let mut interval = interval(Duration::from_secs(BATCH_INTERVAL_SECS));

        loop {
            interval.tick().await;

            if let Err(e) = self.process_batch().await {
                tracing::error!("Error processing analysis batch: {:?}", e);
            }
        }
    }

    /// Process a batch of pending analysis jobs
    async fn process_batch(&self) -> Result<()> {
        let jobs = self.job_service.fetch_pending(MAX_RETRIES, BATCH_SIZE).await?;

        if jobs.is_empty() {
            return Ok(());
        }

        tracing::info!("Processing {} pending analysis jobs", jobs.len());

        for job in jobs {
            if let Err(e) = self.process_job(&job).await {
                tracing::error!("Failed to process analysis job {}: {:?}", job.id, e);
                self.job_service
                    .mark_failed(job.id, job.retry_count, MAX_RETRIES, &e.to_string())
                    .await?;
            }
        }

        Ok(())
    }

    /// Process a single analysis job
    async fn process_job(&self, job: &AnalysisJob) -> Result<()> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, owner_id, object_key, mime, bytes, width, height, sha256,
                   exif_json, status, created_at, updated_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(job.photo_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Photo {} no longer exists", job.photo_id)))?;

        // The object was verified at completion time, but storage offers no
        // read-after-write promise beyond that instant, so check again before
        // declaring the photo ready.
        let status = if self.minio.exists(&photo.object_key).await? {
            "ready"
        } else {
            tracing::warn!(
                "Object '{}' missing for photo {} (owner {}), marking failed",
                photo.object_key,
                photo.id,
                photo.owner_id
            );
            "failed"
        };

        sqlx::query("UPDATE photos SET status = $2::photo_status, updated_at = NOW() WHERE id = $1")
            .bind(job.photo_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        self.job_service.mark_completed(job.id).await?;

        tracing::info!("Photo {} settled as {}", job.photo_id, status);

        Ok(())
    }
}
