//! Report generation pipeline.
//!
//! Builds one uptime/downtime row per store observed in the poll dataset:
//!
//! 1. Anchor: the maximum poll timestamp defines "now" for the entire run,
//!    so a report over a frozen dataset is reproducible.
//! 2. Window filtering runs entirely in UTC, inclusive at both bounds.
//!    Store-local time is used only for the business-hours check.
//! 3. A poll survives only if its local weekday and time-of-day fall within
//!    one of the store's business-hours rules (synthesized 24/7 rules when
//!    the store has none).
//! 4. Each surviving poll counts as [`MINUTES_PER_POLL`] minutes of uptime
//!    or downtime. No interpolation between polls of differing status is
//!    performed; uneven poll spacing skews totals proportionally.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::db::{RepositoryError, StoreDataRepository};
use crate::models::time::{resolve_timezone, to_local};
use crate::models::{always_open, BusinessHoursRule, PollRecord, ReportRow, StoreStatus, Window};
use crate::services::job_tracker::JobTracker;

/// Minutes each poll is assumed to represent when aggregating.
pub const MINUTES_PER_POLL: u64 = 60;

/// Errors that terminate a report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Dataset content that cannot be defaulted around, e.g. an explicitly
    /// assigned but unknown timezone id, or an empty poll dataset.
    #[error("data error: {0}")]
    Data(String),

    #[error("failed to write report artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report artifact: {0}")]
    Csv(#[from] csv::Error),
}

/// Uptime and downtime minutes for one store over one window.
fn aggregate_window(
    polls: &[PollRecord],
    rules: &[BusinessHoursRule],
    tz: Tz,
    anchor: DateTime<Utc>,
    window: Window,
) -> (u64, u64) {
    let window_start = anchor - window.duration();
    let mut active_polls = 0u64;
    let mut inactive_polls = 0u64;
    for poll in polls {
        // Both bounds inclusive, compared in UTC.
        if poll.timestamp_utc < window_start || poll.timestamp_utc > anchor {
            continue;
        }
        if !within_business_hours(to_local(poll.timestamp_utc, tz), rules) {
            continue;
        }
        match poll.status {
            StoreStatus::Active => active_polls += 1,
            StoreStatus::Inactive => inactive_polls += 1,
        }
    }
    (
        active_polls * MINUTES_PER_POLL,
        inactive_polls * MINUTES_PER_POLL,
    )
}

fn within_business_hours(local: DateTime<Tz>, rules: &[BusinessHoursRule]) -> bool {
    // Rules use 0 = Monday .. 6 = Sunday.
    let weekday = local.weekday().num_days_from_monday() as u8;
    let time_of_day = local.time();
    rules.iter().any(|rule| {
        rule.day_of_week == weekday
            && rule.start_time_local <= time_of_day
            && time_of_day <= rule.end_time_local
    })
}

/// Build the full report over the repository's current snapshot.
///
/// Rows appear in first-observation order of their store within the poll
/// dataset, which is stable for a fixed snapshot.
pub async fn build_report(
    repo: &dyn StoreDataRepository,
) -> Result<Vec<ReportRow>, ReportError> {
    let anchor = repo
        .max_timestamp()
        .await?
        .ok_or_else(|| ReportError::Data("poll dataset is empty, no analysis anchor".into()))?;

    let polls = repo.all_polls().await?;
    let mut rules_by_store: HashMap<String, Vec<BusinessHoursRule>> = HashMap::new();
    for rule in repo.business_hours().await? {
        rules_by_store
            .entry(rule.store_id.clone())
            .or_default()
            .push(rule);
    }

    let mut store_order: Vec<String> = Vec::new();
    let mut polls_by_store: HashMap<String, Vec<PollRecord>> = HashMap::new();
    for poll in polls {
        let per_store = polls_by_store.entry(poll.store_id.clone()).or_default();
        if per_store.is_empty() {
            store_order.push(poll.store_id.clone());
        }
        per_store.push(poll);
    }

    let mut rows = Vec::with_capacity(store_order.len());
    for store_id in &store_order {
        let assigned = repo.timezone_for(store_id).await?;
        let tz = resolve_timezone(assigned.as_deref())
            .map_err(|e| ReportError::Data(format!("store {store_id}: {e}")))?;
        let rules = rules_by_store
            .remove(store_id)
            .unwrap_or_else(|| always_open(store_id));
        let store_polls = &polls_by_store[store_id];

        let (uptime_last_hour, downtime_last_hour) =
            aggregate_window(store_polls, &rules, tz, anchor, Window::LastHour);
        let (uptime_last_day, downtime_last_day) =
            aggregate_window(store_polls, &rules, tz, anchor, Window::LastDay);
        let (uptime_last_week, downtime_last_week) =
            aggregate_window(store_polls, &rules, tz, anchor, Window::LastWeek);

        rows.push(ReportRow {
            store_id: store_id.clone(),
            uptime_last_hour,
            uptime_last_day,
            uptime_last_week,
            downtime_last_hour,
            downtime_last_day,
            downtime_last_week,
        });
    }
    Ok(rows)
}

/// Write the report rows as a CSV artifact.
pub fn write_report_csv(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

async fn generate(
    report_id: &str,
    repo: &dyn StoreDataRepository,
    reports_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let rows = build_report(repo).await?;
    let path = reports_dir.join(format!("report_{report_id}.csv"));
    write_report_csv(&rows, &path)?;
    Ok(path)
}

/// Run one report to termination, transitioning its job to `Complete` or
/// `Failed`. Designed to be spawned per trigger; admission is bounded by
/// the semaphore so unbounded triggers cannot exhaust the process.
pub async fn run_report(
    report_id: String,
    tracker: JobTracker,
    repo: Arc<dyn StoreDataRepository>,
    reports_dir: PathBuf,
    permits: Arc<Semaphore>,
) {
    let _permit = match permits.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            tracker.fail_job(&report_id, "report scheduler shut down");
            return;
        }
    };
    info!(report_id = %report_id, "report generation started");
    match generate(&report_id, repo.as_ref(), &reports_dir).await {
        Ok(path) => {
            info!(report_id = %report_id, file = %path.display(), "report generation complete");
            tracker.complete_job(&report_id, path);
        }
        Err(e) => {
            error!(report_id = %report_id, error = %e, "report generation failed");
            tracker.fail_job(&report_id, e.to_string());
        }
    }
}
