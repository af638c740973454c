// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Request-boundary error. Every variant renders as a 200 response with an
/// `{"error": "..."}` body so existing clients keep working.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(String),

    // Company pattern, unparseable numbers, malformed bodies
    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    NotFound(String),

    // Unparseable or out-of-range dates
    #[error("{0}")]
    InvalidDate(String),

    // Weekday, business hours, duration and same-day violations
    #[error("{0}")]
    InvalidTimeWindow(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    StorageError(String),
}

impl ApiError {
    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MissingField(msg) => msg,
            ApiError::InvalidFormat(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InvalidDate(msg) => msg,
            ApiError::InvalidTimeWindow(msg) => msg,
            ApiError::DuplicateKey(msg) => msg,
            ApiError::StorageError(msg) => msg,
        }
    }

    /// Get error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingField(_) => "MISSING_FIELD",
            ApiError::InvalidFormat(_) => "INVALID_FORMAT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidDate(_) => "INVALID_DATE",
            ApiError::InvalidTimeWindow(_) => "INVALID_TIME_WINDOW",
            ApiError::DuplicateKey(_) => "DUPLICATE_KEY",
            ApiError::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn missing_field(message: impl Into<String>) -> Self {
        ApiError::MissingField(message.into())
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        ApiError::InvalidFormat(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        ApiError::InvalidDate(message.into())
    }

    pub fn invalid_time_window(message: impl Into<String>) -> Self {
        ApiError::InvalidTimeWindow(message.into())
    }

    pub fn duplicate_key(message: impl Into<String>) -> Self {
        ApiError::DuplicateKey(message.into())
    }

    pub fn storage_error(message: impl Into<String>) -> Self {
        ApiError::StorageError(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateKey(msg) => ApiError::duplicate_key(msg),
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::storage_error("An error occurred while processing your request")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::storage_error("Database error occurred")
            }
        }
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::StorageError(_) => {
                tracing::warn!(code = self.error_code(), "request failed: {}", self.message())
            }
            _ => tracing::debug!(code = self.error_code(), "request rejected: {}", self.message()),
        }
        (StatusCode::OK, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_error_body() {
        let err = ApiError::invalid_time_window("Hire date must be a weekday");
        assert_eq!(err.to_json(), json!({ "error": "Hire date must be a weekday" }));
        assert_eq!(err.to_string(), "Hire date must be a weekday");
    }

    #[test]
    fn responds_with_200_regardless_of_kind() {
        let response = ApiError::not_found("Employee not found").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ApiError::storage_error("Database error occurred").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn duplicate_key_survives_database_conversion() {
        let err: ApiError = DatabaseError::DuplicateKey("dept_no".to_string()).into();
        assert_eq!(err.error_code(), "DUPLICATE_KEY");
    }

    #[test]
    fn hides_query_details() {
        let err: ApiError = DatabaseError::QueryError("syntax error at or near".to_string()).into();
        assert_eq!(err, ApiError::storage_error("An error occurred while processing your request"));
    }
}
