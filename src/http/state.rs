//! Application state for the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::db::StoreDataRepository;
use crate::services::JobTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository over the three input datasets.
    pub repository: Arc<dyn StoreDataRepository>,
    /// Registry of triggered report jobs.
    pub job_tracker: JobTracker,
    /// Directory report artifacts are written to.
    pub reports_dir: PathBuf,
    /// Admission limit for concurrently running report tasks.
    pub report_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn StoreDataRepository>,
        reports_dir: PathBuf,
        max_concurrent_reports: usize,
    ) -> Self {
        Self {
            repository,
            job_tracker: JobTracker::new(),
            reports_dir,
            report_permits: Arc::new(Semaphore::new(max_concurrent_reports)),
        }
    }
}
