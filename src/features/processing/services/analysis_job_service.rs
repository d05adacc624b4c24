use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::processing::models::AnalysisJob;

/// Service for the photo analysis job queue
pub struct AnalysisJobService {
    pool: PgPool,
}

impl AnalysisJobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enqueue a photo for analysis
    pub async fn enqueue(&self, photo_id: Uuid) -> Result<AnalysisJob> {
        let job = sqlx::query_as::<_, AnalysisJob>(
            r#"
            INSERT INTO analysis_jobs (id, photo_id)
            VALUES ($1, $2)
            RETURNING id, photo_id, status, retry_count, last_error, created_at, processed_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(photo_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Enqueued analysis job {} for photo {}", job.id, photo_id);

        Ok(job)
    }

    /// Fetch the oldest pending jobs that still have retries left
    pub async fn fetch_pending(&self, max_retries: i32, batch_size: i64) -> Result<Vec<AnalysisJob>> {
        let jobs = sqlx::query_as::<_, AnalysisJob>(
            r#"
            SELECT id, photo_id, status, retry_count, last_error, created_at, processed_at
            FROM analysis_jobs
            WHERE status = 'pending' AND retry_count < $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(max_retries)
        .bind(batch_size)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Mark a job as successfully processed
    pub async fn mark_completed(&self, job_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE analysis_jobs SET status = 'completed', processed_at = NOW() WHERE id = $1",
        )
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a processing failure. The job stays pending until its retries
    /// are exhausted, then flips to failed.
    pub async fn mark_failed(
        &self,
        job_id: Uuid,
        retry_count: i32,
        max_retries: i32,
        error: &str,
    ) -> Result<()> {
        if retry_count + 1 >= max_retries {
            sqlx::query(
                r#"
                UPDATE analysis_jobs
                SET status = 'failed', retry_count = retry_count + 1,
                    last_error = $2, processed_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(job_id)
            .bind(error)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                "UPDATE analysis_jobs SET retry_count = retry_count + 1, last_error = $2 WHERE id = $1",
            )
            .bind(job_id)
            .bind(error)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
