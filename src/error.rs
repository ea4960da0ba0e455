//! Error types for the Attendance Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Expected business conditions (unpaired punches, unknown employees, missing
//! holiday data) are never errors; they surface as session statuses and audit
//! warnings instead.

use thiserror::Error;

/// The main error type for the Attendance Reconciliation Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The standard shift length could not be parsed or was not positive.
    #[error("Invalid standard shift length '{value}': {message}")]
    InvalidShiftLength {
        /// The offending input as supplied by the caller.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A holiday calendar entry was not an ISO `YYYY-MM-DD` date.
    #[error("Invalid holiday date '{value}'")]
    InvalidHolidayDate {
        /// The offending calendar entry.
        value: String,
    },

    /// The holiday calendar could not be retrieved from its source.
    #[error("Holiday calendar unavailable: {message}")]
    HolidaySourceUnavailable {
        /// A description of the fetch failure.
        message: String,
    },

    /// A report was requested before any reconciliation had run.
    #[error("No reconciliation has been run yet")]
    NoReconciliation,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
