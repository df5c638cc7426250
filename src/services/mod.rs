//! Service layer: report generation and async job tracking.

pub mod job_tracker;
pub mod report;

pub use job_tracker::{Job, JobStatus, JobTracker};
pub use report::{build_report, run_report, ReportError};
