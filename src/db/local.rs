//! In-memory repository implementation.
//!
//! Backs local development and tests, mirroring the query contract a SQL
//! backend would provide. Reads during a report run are snapshot-style:
//! each accessor clones the rows it returns under a short read lock.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::repository::{RepositoryResult, StoreDataRepository};
use crate::models::{BusinessHoursRule, PollRecord, TimezoneAssignment};

#[derive(Default)]
struct Datasets {
    polls: Vec<PollRecord>,
    business_hours: Vec<BusinessHoursRule>,
    timezones: HashMap<String, String>,
}

/// In-memory implementation of [`StoreDataRepository`].
#[derive(Default)]
pub struct LocalRepository {
    inner: RwLock<Datasets>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_polls(&self, polls: impl IntoIterator<Item = PollRecord>) {
        self.inner.write().polls.extend(polls);
    }

    pub fn insert_business_hours(&self, rules: impl IntoIterator<Item = BusinessHoursRule>) {
        self.inner.write().business_hours.extend(rules);
    }

    pub fn assign_timezone(&self, assignment: TimezoneAssignment) {
        self.inner
            .write()
            .timezones
            .insert(assignment.store_id, assignment.timezone_id);
    }

    pub fn poll_count(&self) -> usize {
        self.inner.read().polls.len()
    }
}

#[async_trait]
impl StoreDataRepository for LocalRepository {
    async fn max_timestamp(&self) -> RepositoryResult<Option<DateTime<Utc>>> {
        Ok(self.inner.read().polls.iter().map(|p| p.timestamp_utc).max())
    }

    async fn all_polls(&self) -> RepositoryResult<Vec<PollRecord>> {
        Ok(self.inner.read().polls.clone())
    }

    async fn business_hours(&self) -> RepositoryResult<Vec<BusinessHoursRule>> {
        Ok(self.inner.read().business_hours.clone())
    }

    async fn timezone_for(&self, store_id: &str) -> RepositoryResult<Option<String>> {
        Ok(self.inner.read().timezones.get(store_id).cloned())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreStatus;
    use chrono::TimeZone;

    fn poll(store_id: &str, hour: u32, status: StoreStatus) -> PollRecord {
        PollRecord {
            store_id: store_id.to_string(),
            timestamp_utc: Utc.with_ymd_and_hms(2023, 1, 25, hour, 0, 0).unwrap(),
            status,
        }
    }

    #[tokio::test]
    async fn max_timestamp_of_empty_dataset_is_none() {
        let repo = LocalRepository::new();
        assert_eq!(repo.max_timestamp().await.unwrap(), None);
    }

    #[tokio::test]
    async fn max_timestamp_spans_all_stores() {
        let repo = LocalRepository::new();
        repo.insert_polls([
            poll("s1", 8, StoreStatus::Active),
            poll("s2", 14, StoreStatus::Inactive),
            poll("s1", 11, StoreStatus::Active),
        ]);
        assert_eq!(
            repo.max_timestamp().await.unwrap(),
            Some(Utc.with_ymd_and_hms(2023, 1, 25, 14, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn timezone_lookup_miss_is_none() {
        let repo = LocalRepository::new();
        repo.assign_timezone(TimezoneAssignment {
            store_id: "s1".to_string(),
            timezone_id: "Asia/Kolkata".to_string(),
        });
        assert_eq!(
            repo.timezone_for("s1").await.unwrap().as_deref(),
            Some("Asia/Kolkata")
        );
        assert_eq!(repo.timezone_for("s2").await.unwrap(), None);
    }
}
