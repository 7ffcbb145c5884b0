//! Error handling for the Stockroom analytics server
//!
//! Every failure leaves the server as a JSON `{"error": {...}}` body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{SnapshotError, TimestampError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Snapshot data errors
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] TimestampError),

    #[error("Malformed source data in {file}: {message}")]
    MalformedSource { file: String, message: String },

    // Source errors
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InvalidSnapshot(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_SNAPSHOT".to_string(),
                    message: err.to_string(),
                    field: err.field().map(str::to_string),
                },
            ),
            AppError::InvalidTimestamp(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_TIMESTAMP".to_string(),
                    message: err.to_string(),
                    field: Some("timestamp".to_string()),
                },
            ),
            AppError::MalformedSource { file, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "MALFORMED_SOURCE".to_string(),
                    message: format!("{}: {}", file, message),
                    field: None,
                },
            ),
            AppError::SourceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SOURCE_UNAVAILABLE".to_string(),
                    message: format!("Inventory source unavailable: {}", msg),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_errors_are_unprocessable() {
        let err = AppError::from(SnapshotError::DuplicateItemId("sku-1".to_string()));
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail.code, "INVALID_SNAPSHOT");
        assert_eq!(detail.field.as_deref(), Some("id"));
    }

    #[test]
    fn test_validation_is_bad_request() {
        let (status, detail) = AppError::validation("days", "out of range").status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("days"));
    }

    #[test]
    fn test_database_error_hides_details() {
        let (status, detail) = AppError::from(sqlx::Error::PoolTimedOut).status_and_detail();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail.message, "A database error occurred");
    }
}
