mod analysis_job_service;

pub use analysis_job_service::AnalysisJobService;
