//! Response types for the Attendance Reconciliation Engine API.
//!
//! This module defines the success bodies of each endpoint plus the error
//! response structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditTrace, HourBreakdown, ReportRow};

/// Response body for the `/reconcile` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Version of the engine that produced the run.
    pub engine_version: String,
    /// Rows dropped for lacking a name or a parsable timestamp.
    pub dropped_rows: usize,
    /// Punches removed as repeats.
    pub duplicate_punches: usize,
    /// Standard shift length the run used.
    pub standard_hours: Decimal,
    /// Filtered report rows.
    pub rows: Vec<ReportRow>,
    /// Four-bucket totals over `rows`.
    pub totals: HourBreakdown,
    /// Number of incomplete sessions in `rows`.
    pub incomplete_sessions: usize,
    /// Per-session decisions and run warnings.
    pub audit_trace: AuditTrace,
}

/// Response body for `GET /holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidaysResponse {
    /// Holiday dates in ascending ISO order.
    pub holidays: Vec<String>,
}

/// Response body for `POST /holidays/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHolidayResponse {
    /// The toggled date.
    pub date: NaiveDate,
    /// Whether the date is a holiday after the toggle.
    pub is_holiday: bool,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidShiftLength { value, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT_LENGTH",
                    format!("Invalid standard shift length '{}'", value),
                    message,
                ),
            },
            EngineError::InvalidHolidayDate { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_HOLIDAY_DATE",
                    format!("Invalid holiday date '{}'", value),
                    "Holiday dates must be formatted as YYYY-MM-DD",
                ),
            },
            EngineError::HolidaySourceUnavailable { message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "HOLIDAY_SOURCE_UNAVAILABLE",
                    "Holiday calendar unavailable",
                    message,
                ),
            },
            EngineError::NoReconciliation => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "NO_RECONCILIATION",
                    "No reconciliation has been run yet",
                    "POST attendance rows to /reconcile before requesting a report",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_shift_length_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidShiftLength {
            value: "abc".to_string(),
            message: "invalid decimal".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SHIFT_LENGTH");
        assert!(api_error.error.message.contains("abc"));
    }

    #[test]
    fn test_no_reconciliation_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::NoReconciliation.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "NO_RECONCILIATION");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "engine.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
