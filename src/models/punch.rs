//! Punch models.
//!
//! This module contains the [`PunchRow`] type, which carries a single raw input
//! row exactly as exported by a time clock, and the [`Punch`] type, which is
//! the normalized `(employee, timestamp, event)` triple the rest of the engine
//! works with.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw time-clock row with arbitrary column names.
///
/// Exports from different clock vendors (and different generations of the
/// same vendor) name their columns differently, so a row is kept as an
/// untyped column → value map until the normalizer resolves the aliases.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchRow;
/// use serde_json::json;
///
/// let row: PunchRow = serde_json::from_value(json!({
///     "Employee Name": "Ayse Demir",
///     "Date/Time": "2026-01-14 08:00:00",
///     "Status": "C/In"
/// }))
/// .unwrap();
///
/// assert_eq!(row.columns().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PunchRow(Map<String, Value>);

impl PunchRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a column, returning the row for chaining.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Returns the underlying column map.
    pub fn columns(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PunchRow {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}

/// A single normalized clock punch.
///
/// The same shape is used before and after deduplication; a "clean" punch
/// list is simply one that has been passed through
/// [`deduplicate_punches`](crate::calculation::deduplicate_punches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The employee's name as it appears on the clock export.
    pub employee_name: String,
    /// Wall-clock time of the punch.
    pub timestamp: NaiveDateTime,
    /// Free-text event label from the clock (e.g. "C/In"), if present.
    #[serde(default)]
    pub event_label: Option<String>,
}

impl Punch {
    /// Creates a punch without an event label.
    pub fn new(employee_name: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            employee_name: employee_name.into(),
            timestamp,
            event_label: None,
        }
    }

    /// Returns the calendar date of the punch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
