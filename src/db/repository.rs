//! Repository trait and error types for dataset access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{BusinessHoursRule, PollRecord};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// Any repository failure is fatal for the report run that encountered it;
/// callers must not retry silently.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached or opened.
    #[error("connection error: {0}")]
    Connection(String),

    /// A query against the backing store failed.
    #[error("query error: {0}")]
    Query(String),

    /// The backing store returned a row that does not satisfy the dataset
    /// schema (unparseable timestamp, invalid weekday, bad time-of-day).
    #[error("malformed row in {dataset}: {message}")]
    MalformedRow { dataset: String, message: String },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    pub fn malformed_row(dataset: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            dataset: dataset.into(),
            message: message.into(),
        }
    }
}

/// Read-only access to the poll, business-hours, and timezone datasets.
///
/// No ordering is guaranteed on returned sequences. Implementations must be
/// `Send + Sync` to be shared across concurrently running report tasks.
#[async_trait]
pub trait StoreDataRepository: Send + Sync {
    /// Latest `timestamp_utc` across all polls, or `None` for an empty
    /// dataset. Defines the analysis anchor for a report run.
    async fn max_timestamp(&self) -> RepositoryResult<Option<DateTime<Utc>>>;

    /// Every poll observation in the dataset.
    async fn all_polls(&self) -> RepositoryResult<Vec<PollRecord>>;

    /// Every business-hours rule; callers group by store.
    async fn business_hours(&self) -> RepositoryResult<Vec<BusinessHoursRule>>;

    /// The timezone id assigned to a store, if any.
    async fn timezone_for(&self, store_id: &str) -> RepositoryResult<Option<String>>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
