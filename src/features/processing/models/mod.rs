mod analysis_job;

pub use analysis_job::{AnalysisJob, AnalysisJobStatus};
