//! Pipeline orchestration

pub mod orchestrator;
pub mod result;

pub use orchestrator::DocsPipeline;
pub use result::RunSummary;
