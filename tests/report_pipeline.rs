//! End-to-end tests of the report pipeline: dataset in, CSV artifact out,
//! job lifecycle observed through the tracker.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tokio::sync::Semaphore;

use store_monitor::db::{LocalRepository, StoreDataRepository};
use store_monitor::models::{PollRecord, StoreStatus, TimezoneAssignment};
use store_monitor::services::{report, JobStatus, JobTracker};

fn poll(store_id: &str, hour: u32, minute: u32, status: StoreStatus) -> PollRecord {
    PollRecord {
        store_id: store_id.to_string(),
        timestamp_utc: Utc.with_ymd_and_hms(2023, 1, 25, hour, minute, 0).unwrap(),
        status,
    }
}

fn seeded_repo() -> Arc<LocalRepository> {
    let repo = LocalRepository::new();
    repo.insert_polls([
        poll("s1", 10, 0, StoreStatus::Active),
        poll("s1", 10, 30, StoreStatus::Inactive),
        poll("s2", 9, 0, StoreStatus::Active),
    ]);
    repo.assign_timezone(TimezoneAssignment {
        store_id: "s2".to_string(),
        timezone_id: "Asia/Kolkata".to_string(),
    });
    Arc::new(repo)
}

#[tokio::test]
async fn run_report_completes_and_writes_artifact() {
    let repo = seeded_repo();
    let tracker = JobTracker::new();
    let reports_dir = tempfile::tempdir().unwrap();
    let report_id = tracker.create_job();

    report::run_report(
        report_id.clone(),
        tracker.clone(),
        repo.clone() as Arc<dyn StoreDataRepository>,
        reports_dir.path().to_path_buf(),
        Arc::new(Semaphore::new(1)),
    )
    .await;

    let job = tracker.get_job(&report_id).unwrap();
    assert_eq!(job.status, JobStatus::Complete);
    let file = job.file.unwrap();
    assert!(file.exists());

    let contents = std::fs::read_to_string(&file).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "store_id,uptime_last_hour,uptime_last_day,uptime_last_week,downtime_last_hour,downtime_last_day,downtime_last_week"
    );
    // s1 appears first in the poll dataset; anchor is s1's 10:30 poll.
    assert_eq!(lines.next().unwrap(), "s1,60,60,60,60,60,60");
    assert_eq!(lines.next().unwrap(), "s2,0,60,60,0,0,0");
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn run_report_on_empty_dataset_fails_instead_of_sticking_at_running() {
    let repo = Arc::new(LocalRepository::new());
    let tracker = JobTracker::new();
    let reports_dir = tempfile::tempdir().unwrap();
    let report_id = tracker.create_job();

    report::run_report(
        report_id.clone(),
        tracker.clone(),
        repo as Arc<dyn StoreDataRepository>,
        reports_dir.path().to_path_buf(),
        Arc::new(Semaphore::new(1)),
    )
    .await;

    let job = tracker.get_job(&report_id).unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.unwrap().contains("analysis anchor"));
    assert!(job.file.is_none());
}

#[tokio::test]
async fn concurrent_reports_do_not_interfere() {
    let repo = seeded_repo();
    let tracker = JobTracker::new();
    let reports_dir = tempfile::tempdir().unwrap();
    let permits = Arc::new(Semaphore::new(2));

    let mut ids = Vec::new();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let report_id = tracker.create_job();
        ids.push(report_id.clone());
        handles.push(tokio::spawn(report::run_report(
            report_id,
            tracker.clone(),
            repo.clone() as Arc<dyn StoreDataRepository>,
            reports_dir.path().to_path_buf(),
            permits.clone(),
        )));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for id in ids {
        let job = tracker.get_job(&id).unwrap();
        assert_eq!(job.status, JobStatus::Complete);
        assert!(job.file.unwrap().ends_with(format!("report_{id}.csv")));
    }
}
