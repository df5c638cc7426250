//! CSV dataset ingestion.
//!
//! Seeds a [`LocalRepository`] from the three input files:
//! `store_status.csv`, `business_hours.csv`, and `timezones.csv`. The poll
//! file is required; the other two may be absent, in which case the
//! defaults (24/7 hours, default timezone) apply to every store. A
//! malformed row anywhere fails the load — partial datasets would produce
//! silently wrong reports.

use std::path::Path;

use chrono::NaiveTime;
use serde::Deserialize;
use tracing::warn;

use super::local::LocalRepository;
use super::repository::{RepositoryError, RepositoryResult};
use crate::models::time::parse_poll_timestamp;
use crate::models::{BusinessHoursRule, PollRecord, StoreStatus, TimezoneAssignment};

pub const STORE_STATUS_FILE: &str = "store_status.csv";
pub const BUSINESS_HOURS_FILE: &str = "business_hours.csv";
pub const TIMEZONES_FILE: &str = "timezones.csv";

/// Row counts loaded from each dataset, for startup logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetCounts {
    pub polls: usize,
    pub business_hours: usize,
    pub timezones: usize,
}

#[derive(Debug, Deserialize)]
struct PollCsvRow {
    store_id: String,
    timestamp_utc: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct BusinessHoursCsvRow {
    store_id: String,
    // Some exports of this dataset use camelCase for the weekday column.
    #[serde(alias = "dayOfWeek")]
    day_of_week: u8,
    start_time_local: String,
    end_time_local: String,
}

#[derive(Debug, Deserialize)]
struct TimezoneCsvRow {
    store_id: String,
    #[serde(alias = "timezone_str")]
    timezone_id: String,
}

/// Load all three datasets from `data_dir` into `repo`.
pub fn load_datasets(repo: &LocalRepository, data_dir: &Path) -> RepositoryResult<DatasetCounts> {
    let mut counts = DatasetCounts::default();

    let polls = read_polls(&data_dir.join(STORE_STATUS_FILE))?;
    counts.polls = polls.len();
    repo.insert_polls(polls);

    let hours_path = data_dir.join(BUSINESS_HOURS_FILE);
    if hours_path.exists() {
        let rules = read_business_hours(&hours_path)?;
        counts.business_hours = rules.len();
        repo.insert_business_hours(rules);
    } else {
        warn!(path = %hours_path.display(), "business hours file missing, all stores treated as 24/7");
    }

    let timezones_path = data_dir.join(TIMEZONES_FILE);
    if timezones_path.exists() {
        let assignments = read_timezones(&timezones_path)?;
        counts.timezones = assignments.len();
        for assignment in assignments {
            repo.assign_timezone(assignment);
        }
    } else {
        warn!(path = %timezones_path.display(), "timezones file missing, default timezone assumed everywhere");
    }

    Ok(counts)
}

fn open_reader(path: &Path) -> RepositoryResult<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path)
        .map_err(|e| RepositoryError::connection(format!("{}: {e}", path.display())))
}

fn read_polls(path: &Path) -> RepositoryResult<Vec<PollRecord>> {
    let mut reader = open_reader(path)?;
    let mut polls = Vec::new();
    for row in reader.deserialize::<PollCsvRow>() {
        let row = row.map_err(|e| RepositoryError::malformed_row(STORE_STATUS_FILE, e.to_string()))?;
        let timestamp_utc = parse_poll_timestamp(&row.timestamp_utc)
            .map_err(|e| RepositoryError::malformed_row(STORE_STATUS_FILE, e.to_string()))?;
        let status = parse_status(&row.status)?;
        polls.push(PollRecord {
            store_id: row.store_id,
            timestamp_utc,
            status,
        });
    }
    Ok(polls)
}

fn parse_status(raw: &str) -> RepositoryResult<StoreStatus> {
    match raw.trim() {
        "active" => Ok(StoreStatus::Active),
        "inactive" => Ok(StoreStatus::Inactive),
        other => Err(RepositoryError::malformed_row(
            STORE_STATUS_FILE,
            format!("unknown status {other:?}"),
        )),
    }
}

fn read_business_hours(path: &Path) -> RepositoryResult<Vec<BusinessHoursRule>> {
    let mut reader = open_reader(path)?;
    let mut rules = Vec::new();
    for row in reader.deserialize::<BusinessHoursCsvRow>() {
        let row =
            row.map_err(|e| RepositoryError::malformed_row(BUSINESS_HOURS_FILE, e.to_string()))?;
        if row.day_of_week > 6 {
            return Err(RepositoryError::malformed_row(
                BUSINESS_HOURS_FILE,
                format!("day_of_week {} out of range 0..=6", row.day_of_week),
            ));
        }
        rules.push(BusinessHoursRule {
            store_id: row.store_id,
            day_of_week: row.day_of_week,
            start_time_local: parse_local_time(&row.start_time_local)?,
            end_time_local: parse_local_time(&row.end_time_local)?,
        });
    }
    Ok(rules)
}

fn parse_local_time(raw: &str) -> RepositoryResult<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| {
            RepositoryError::malformed_row(
                BUSINESS_HOURS_FILE,
                format!("unparseable time-of-day {raw:?}"),
            )
        })
}

fn read_timezones(path: &Path) -> RepositoryResult<Vec<TimezoneAssignment>> {
    let mut reader = open_reader(path)?;
    let mut assignments = Vec::new();
    for row in reader.deserialize::<TimezoneCsvRow>() {
        let row = row.map_err(|e| RepositoryError::malformed_row(TIMEZONES_FILE, e.to_string()))?;
        assignments.push(TimezoneAssignment {
            store_id: row.store_id,
            timezone_id: row.timezone_id,
        });
    }
    Ok(assignments)
}
