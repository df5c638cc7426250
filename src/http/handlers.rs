//! HTTP handlers for the REST API.
//!
//! Each handler delegates to the service layer; the trigger handler never
//! waits on report generation.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{GetReportQuery, HealthResponse, ReportStatusResponse, TriggerReportResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::{report, JobStatus};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Verify the service is running and the dataset backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database,
    }))
}

/// POST /trigger_report
///
/// Register a new report job and spawn its generation task. Returns the
/// report id immediately.
pub async fn trigger_report(State(state): State<AppState>) -> Json<TriggerReportResponse> {
    let report_id = state.job_tracker.create_job();

    let task_id = report_id.clone();
    let tracker = state.job_tracker.clone();
    let repo = state.repository.clone();
    let reports_dir = state.reports_dir.clone();
    let permits = state.report_permits.clone();
    tokio::spawn(async move {
        report::run_report(task_id, tracker, repo, reports_dir, permits).await;
    });

    Json(TriggerReportResponse { report_id })
}

/// GET /get_report?report_id=<token>
///
/// Current state of a report job: `Running`, `Complete` (with the artifact
/// path), or `Failed` (with the error). Unknown tokens are a 404.
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<GetReportQuery>,
) -> HandlerResult<ReportStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&query.report_id)
        .ok_or(AppError::InvalidReportId)?;

    let response = match job.status {
        JobStatus::Running => ReportStatusResponse::Running,
        JobStatus::Complete => ReportStatusResponse::Complete {
            file: job
                .file
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        },
        JobStatus::Failed => ReportStatusResponse::Failed {
            error: job
                .error
                .unwrap_or_else(|| "report generation failed".to_string()),
        },
    };
    Ok(Json(response))
}
