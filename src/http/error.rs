//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Status query for a report id the registry has never issued.
    InvalidReportId,
    /// Repository failure surfaced directly to the caller.
    Repository(crate::db::RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidReportId => {
                (StatusCode::NOT_FOUND, "Invalid report_id".to_string())
            }
            AppError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        (status, Json(ApiError { error: message })).into_response()
    }
}

impl From<crate::db::RepositoryError> for AppError {
    fn from(err: crate::db::RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
