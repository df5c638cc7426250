//! In-memory registry for asynchronous report jobs.
//!
//! Each triggered report gets a uuid token and a `Running` entry here; the
//! background task transitions it to `Complete` or `Failed` exactly once.
//! Entries are never removed within the process lifetime. Lock scope is
//! limited to the map operation itself, never held across report
//! generation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

/// Lifecycle state of a report job. Monotonic: `Running` is the only
/// non-terminal state and is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum JobStatus {
    Running,
    Complete,
    Failed,
}

/// A report job and its terminal artifact or error.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Job {
    pub report_id: String,
    pub status: JobStatus,
    /// Path of the produced CSV artifact, set on `Complete`.
    pub file: Option<PathBuf>,
    /// Human-readable failure message, set on `Failed`.
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Process-wide concurrent job registry.
#[derive(Clone, Default)]
pub struct JobTracker {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh `Running` job and return its report id.
    pub fn create_job(&self) -> String {
        let report_id = Uuid::new_v4().to_string();
        let job = Job {
            report_id: report_id.clone(),
            status: JobStatus::Running,
            file: None,
            error: None,
            created_at: chrono::Utc::now(),
            completed_at: None,
        };
        self.jobs.write().insert(report_id.clone(), job);
        report_id
    }

    /// Transition a job to `Complete` with its artifact path. A job already
    /// in a terminal state is left untouched.
    pub fn complete_job(&self, report_id: &str, file: PathBuf) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(report_id) {
            if job.status != JobStatus::Running {
                return;
            }
            job.status = JobStatus::Complete;
            job.file = Some(file);
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Transition a job to `Failed` with the captured error. A job already
    /// in a terminal state is left untouched.
    pub fn fail_job(&self, report_id: &str, error: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(report_id) {
            if job.status != JobStatus::Running {
                return;
            }
            job.status = JobStatus::Failed;
            job.error = Some(error.into());
            job.completed_at = Some(chrono::Utc::now());
        }
    }

    /// Snapshot of a job by id.
    pub fn get_job(&self, report_id: &str) -> Option<Job> {
        self.jobs.read().get(report_id).cloned()
    }
}
