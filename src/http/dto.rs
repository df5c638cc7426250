//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

/// Response for `POST /trigger_report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReportResponse {
    /// Opaque token identifying the report job.
    pub report_id: String,
}

/// Query parameters for `GET /get_report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetReportQuery {
    pub report_id: String,
}

/// Response for `GET /get_report`.
///
/// Serializes as `{"status": "Running"}`, `{"status": "Complete", "file": ...}`
/// or `{"status": "Failed", "error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ReportStatusResponse {
    Running,
    Complete { file: String },
    Failed { error: String },
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
