//! Request types for the Attendance Reconciliation Engine API.
//!
//! This module defines the JSON request structures for the `/reconcile` and
//! `/holidays/toggle` endpoints. `/report` takes a [`ReportFilter`] as its
//! query string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ShiftConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PunchRow, ReportFilter};

/// Request body for the `/reconcile` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// Raw attendance rows, one JSON object per spreadsheet row.
    pub rows: Vec<PunchRow>,
    /// Standard shift length for this run, as a number or a numeric string.
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub standard_hours: Option<Value>,
    /// Filter applied to the returned rows and totals.
    #[serde(default)]
    pub filter: Option<ReportFilter>,
}

impl ReconcileRequest {
    /// Resolves the shift configuration for this run.
    pub fn shift_config(&self, default: ShiftConfig) -> EngineResult<ShiftConfig> {
        match &self.standard_hours {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Number(n)) => n.to_string().parse(),
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(EngineError::InvalidShiftLength {
                value: other.to_string(),
                message: "expected a number or a numeric string".to_string(),
            }),
        }
    }
}

/// Request body for the `/holidays/toggle` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleHolidayRequest {
    /// The date to toggle, as `YYYY-MM-DD`.
    pub date: String,
}

impl ToggleHolidayRequest {
    /// Parses the requested date.
    pub fn parse_date(&self) -> EngineResult<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::InvalidHolidayDate {
                value: self.date.clone(),
            }
        })
    }
}
