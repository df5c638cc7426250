//! Domain types for store monitoring.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub mod time;

/// Operational status reported by a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Active,
    Inactive,
}

/// A single timestamped status observation for a store.
///
/// Polls arrive unordered and carry no uniqueness constraint on their
/// timestamp. Naive source timestamps are interpreted as UTC at the
/// ingestion boundary (see [`time::parse_poll_timestamp`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRecord {
    pub store_id: String,
    pub timestamp_utc: DateTime<Utc>,
    pub status: StoreStatus,
}

/// A per-weekday local opening interval for a store.
///
/// `day_of_week` is 0 = Monday .. 6 = Sunday. A store may have zero, one,
/// or several rules; a store with none is treated as open 24/7 via
/// [`always_open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursRule {
    pub store_id: String,
    pub day_of_week: u8,
    pub start_time_local: NaiveTime,
    pub end_time_local: NaiveTime,
}

/// Timezone assignment for a store. At most one per store; stores without
/// one fall back to [`time::DEFAULT_TIMEZONE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneAssignment {
    pub store_id: String,
    pub timezone_id: String,
}

/// One output row of the uptime report. All six values are integer minutes.
///
/// Field order defines the CSV artifact column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub store_id: String,
    pub uptime_last_hour: u64,
    pub uptime_last_day: u64,
    pub uptime_last_week: u64,
    pub downtime_last_hour: u64,
    pub downtime_last_day: u64,
    pub downtime_last_week: u64,
}

/// A trailing analysis window ending at the report's analysis anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    LastHour,
    LastDay,
    LastWeek,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::LastHour, Window::LastDay, Window::LastWeek];

    pub fn duration(self) -> chrono::Duration {
        match self {
            Window::LastHour => chrono::Duration::hours(1),
            Window::LastDay => chrono::Duration::days(1),
            Window::LastWeek => chrono::Duration::days(7),
        }
    }
}

/// Synthesized 24/7 rule set for a store without configured business hours.
/// Never persisted; built on demand during aggregation.
pub fn always_open(store_id: &str) -> Vec<BusinessHoursRule> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time");
    (0..7)
        .map(|day| BusinessHoursRule {
            store_id: store_id.to_string(),
            day_of_week: day,
            start_time_local: NaiveTime::MIN,
            end_time_local: end_of_day,
        })
        .collect()
}
