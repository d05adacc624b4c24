use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "analysis_job_status", rename_all = "lowercase")]
pub enum AnalysisJobStatus {
    Pending,
    Completed,
    Failed,
}

/// Database model for queued photo analysis jobs
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct AnalysisJob {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub status: AnalysisJobStatus,
    pub retry_count: i32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}
