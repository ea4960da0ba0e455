//! Punch normalization.
//!
//! This module maps heterogeneous time-clock rows onto the uniform
//! [`Punch`] triple. Column names are matched against known aliases after
//! case folding and stripping punctuation, so `"Employee Name"`,
//! `"employee_name"` and `"EMPLOYEENAME"` all resolve to the name column.
//!
//! Timestamps may arrive as spreadsheet serial numbers (days since
//! 1899-12-30, fractional part is the time of day) or as text in one of the
//! common clock export formats. A row whose name or timestamp cannot be
//! resolved is dropped; it is never turned into a partial punch.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tracing::debug;

use crate::models::{Punch, PunchRow};

/// Column aliases holding the employee name.
const NAME_ALIASES: &[&str] = &[
    "name",
    "employee",
    "employeename",
    "staff",
    "staffname",
    "personnel",
    "fullname",
    "person",
    "worker",
];

/// Column aliases holding a full date and time.
const TIMESTAMP_ALIASES: &[&str] = &[
    "timestamp",
    "datetime",
    "punchtime",
    "clocktime",
    "checktime",
    "punch",
];

/// Column aliases holding a date, possibly with a time.
const DATE_ALIASES: &[&str] = &["date", "day", "punchdate"];

/// Column aliases holding a time of day, possibly with a date.
const TIME_ALIASES: &[&str] = &["time", "hour", "clock"];

/// Column aliases holding the event label.
const EVENT_ALIASES: &[&str] = &[
    "event",
    "eventtype",
    "status",
    "direction",
    "type",
    "state",
    "inout",
];

/// Full date-time text formats, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only text formats, used when date and time sit in separate columns.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Time-only text formats, used when date and time sit in separate columns.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Largest serial accepted (1 January 10000).
const MAX_SERIAL: f64 = 2_958_466.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The output of normalizing a batch of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPunches {
    /// Punches resolved from the input, in input order.
    pub punches: Vec<Punch>,
    /// Number of rows dropped for lacking a name or a parsable timestamp.
    pub dropped_rows: usize,
}

/// Normalizes a batch of rows, counting the rows that had to be dropped.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::normalize_rows;
/// use attendance_engine::models::PunchRow;
///
/// let rows = vec![
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-01-14 08:00"),
///     PunchRow::new().with("Name", "Ayse"),
///     PunchRow::new().with("Timestamp", "2026-01-14 08:00"),
/// ];
///
/// let result = normalize_rows(&rows);
/// assert_eq!(result.punches.len(), 1);
/// assert_eq!(result.dropped_rows, 2);
/// ```
pub fn normalize_rows(rows: &[PunchRow]) -> NormalizedPunches {
    let mut punches = Vec::with_capacity(rows.len());
    let mut dropped_rows = 0;

    for row in rows {
        match normalize_row(row) {
            Some(punch) => punches.push(punch),
            None => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        debug!(
            dropped_rows,
            kept = punches.len(),
            "Dropped rows without a resolvable name or timestamp"
        );
    }

    NormalizedPunches {
        punches,
        dropped_rows,
    }
}

/// Normalizes a single row into a [`Punch`].
///
/// Returns `None` when the row has no employee name or no timestamp that
/// can be parsed.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::normalize_row;
/// use attendance_engine::models::PunchRow;
/// use chrono::NaiveDate;
///
/// // Serial 46036.5 is 2026-01-14 12:00
/// let row = PunchRow::new()
///     .with("Employee Name", "Mehmet Kaya")
///     .with("Date/Time", 46036.5)
///     .with("Status", "C/Out");
///
/// let punch = normalize_row(&row).unwrap();
/// assert_eq!(punch.employee_name, "Mehmet Kaya");
/// assert_eq!(
///     punch.timestamp,
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap().and_hms_opt(12, 0, 0).unwrap()
/// );
/// assert_eq!(punch.event_label.as_deref(), Some("C/Out"));
/// ```
pub fn normalize_row(row: &PunchRow) -> Option<Punch> {
    let employee_name = lookup(row, NAME_ALIASES).and_then(value_to_text)?;
    let timestamp = resolve_timestamp(row)?;
    let event_label = lookup(row, EVENT_ALIASES).and_then(value_to_text);

    Some(Punch {
        employee_name,
        timestamp,
        event_label,
    })
}

/// Parses a single timestamp cell.
///
/// Numbers (and numeric strings) are treated as spreadsheet serials; text
/// is tried as RFC 3339 first, keeping the wall-clock time and discarding
/// the offset, then against the supported clock export formats.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => n.as_f64().and_then(serial_to_datetime),
        Value::String(s) => parse_timestamp_text(s),
        _ => None,
    }
}

/// Converts a spreadsheet serial day number to a date-time.
///
/// The integer part counts days since 1899-12-30; the fractional part is
/// the time of day, rounded to the nearest second.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::serial_to_datetime;
/// use chrono::NaiveDate;
///
/// let dt = serial_to_datetime(45658.75).unwrap();
/// assert_eq!(dt, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(18, 0, 0).unwrap());
///
/// assert!(serial_to_datetime(-1.0).is_none());
/// assert!(serial_to_datetime(f64::NAN).is_none());
/// ```
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 || serial >= MAX_SERIAL {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    serial_epoch()?.checked_add_signed(Duration::seconds(seconds))
}

/// Midnight at the start of 1899-12-30, day zero of the serial calendar.
fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

fn parse_timestamp_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(serial) = text.parse::<f64>() {
        return serial_to_datetime(serial);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// Resolves the punch time from either a combined column or a separate
/// date column and time column.
fn resolve_timestamp(row: &PunchRow) -> Option<NaiveDateTime> {
    if let Some(value) = lookup(row, TIMESTAMP_ALIASES) {
        return parse_timestamp(value);
    }

    match (lookup(row, DATE_ALIASES), lookup(row, TIME_ALIASES)) {
        (Some(date), Some(time)) => combine_date_and_time(date, time)
            .or_else(|| parse_timestamp(date))
            .or_else(|| parse_timestamp(time)),
        (Some(value), None) | (None, Some(value)) => parse_timestamp(value),
        (None, None) => None,
    }
}

fn combine_date_and_time(date: &Value, time: &Value) -> Option<NaiveDateTime> {
    let midnight = parse_date_part(date)?.and_hms_opt(0, 0, 0)?;
    midnight.checked_add_signed(parse_time_offset(time)?)
}

fn parse_date_part(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => n.as_f64().and_then(serial_to_datetime).map(|dt| dt.date()),
        Value::String(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        }
        _ => None,
    }
}

/// Time of day as an offset from midnight.
///
/// A serial fraction that rounds up to a full day yields 24h, carrying the
/// punch into the next day the same way a combined serial does.
fn parse_time_offset(value: &Value) -> Option<Duration> {
    match value {
        // A bare serial fraction (e.g. 0.5) carries only the time of day.
        Value::Number(n) => {
            let fraction = n.as_f64()?.fract();
            if !(0.0..1.0).contains(&fraction) {
                return None;
            }
            Some(Duration::seconds((fraction * SECONDS_PER_DAY).round() as i64))
        }
        Value::String(s) => {
            let s = s.trim();
            let time = TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())?;
            Some(time.signed_duration_since(NaiveTime::MIN))
        }
        _ => None,
    }
}

/// Finds the first non-blank value whose column matches an alias.
///
/// Aliases are checked in priority order, so a row carrying both `"Name"`
/// and `"Worker"` resolves to `"Name"`.
fn lookup<'a>(row: &'a PunchRow, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        row.columns()
            .iter()
            .find(|(column, value)| normalize_column(column) == *alias && !is_blank(value))
            .map(|(_, value)| value)
    })
}

fn normalize_column(column: &str) -> String {
    column
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
