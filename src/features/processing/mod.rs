pub mod models;
pub mod services;
pub mod workers;

pub use services::AnalysisJobService;
pub use workers::PhotoProcessor;
