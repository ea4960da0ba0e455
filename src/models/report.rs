//! Report models.
//!
//! This module contains the shapes handed to downstream report rendering:
//! the [`ReportFilter`] a caller applies, one [`ReportRow`] per session, and
//! the [`ReportView`] that pairs the filtered rows with their totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DayType;

use super::{CategorizedSession, HourBreakdown, SessionStatus};

/// Employee and date-range filter applied to a reconciliation.
///
/// Every field is optional; an empty filter selects everything. Both date
/// bounds are inclusive and compare against the session date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ReportFilter;
/// use chrono::NaiveDate;
///
/// let filter = ReportFilter {
///     employee: Some("Ayse Demir".to_string()),
///     from: NaiveDate::from_ymd_opt(2026, 1, 1),
///     to: NaiveDate::from_ymd_opt(2026, 1, 31),
/// };
///
/// assert!(filter.matches("Ayse Demir", NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
/// assert!(!filter.matches("Ayse Demir", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert!(!filter.matches("Mehmet Kaya", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Exact employee name to keep.
    #[serde(default)]
    pub employee: Option<String>,
    /// First session date to keep.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last session date to keep.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    /// Returns true if a session for `employee` on `date` passes the filter.
    pub fn matches(&self, employee: &str, date: NaiveDate) -> bool {
        if let Some(name) = &self.employee {
            if name != employee {
                return false;
            }
        }
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// One reporting row per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The employee's name.
    pub employee_name: String,
    /// Session date (entry date).
    pub date: NaiveDate,
    /// Session date formatted for display (`DD.MM.YYYY`).
    pub display_date: String,
    /// True when the session date is a holiday.
    pub is_holiday: bool,
    /// True when the session date is a Saturday or Sunday that is not a holiday.
    pub is_weekend: bool,
    /// Entry clock time (`HH:MM`).
    pub entry_time: String,
    /// Exit clock time (`HH:MM`), absent for incomplete sessions.
    pub exit_time: Option<String>,
    /// Whether the session counts toward totals.
    pub status: SessionStatus,
    /// Weekday hours up to the standard shift.
    pub normal_hours: Decimal,
    /// Weekday overtime and weekend hours.
    pub overtime_hours: Decimal,
    /// Holiday hours up to the standard shift.
    pub holiday_base_hours: Decimal,
    /// Holiday hours past the standard shift.
    pub holiday_overtime_hours: Decimal,
    /// Elapsed hours, absent for incomplete sessions.
    pub total_hours: Option<Decimal>,
    /// True when the exit fell on a later date than the entry.
    pub is_overnight: bool,
}

impl From<&CategorizedSession> for ReportRow {
    fn from(categorized: &CategorizedSession) -> Self {
        let session = &categorized.session;
        let breakdown = &categorized.breakdown;
        ReportRow {
            employee_name: session.employee_name.clone(),
            date: session.session_date,
            display_date: session.session_date.format("%d.%m.%Y").to_string(),
            is_holiday: session.day_type == DayType::Holiday,
            is_weekend: session.day_type == DayType::Weekend,
            entry_time: session.entry_time.format("%H:%M").to_string(),
            exit_time: session.exit_time.map(|t| t.format("%H:%M").to_string()),
            status: categorized.status,
            normal_hours: breakdown.normal_hours,
            overtime_hours: breakdown.overtime_hours,
            holiday_base_hours: breakdown.holiday_base_hours,
            holiday_overtime_hours: breakdown.holiday_overtime_hours,
            total_hours: session.total_hours,
            is_overnight: session.is_overnight,
        }
    }
}

/// Filtered report rows and their four-bucket totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    /// Rows sorted by employee name, then date.
    pub rows: Vec<ReportRow>,
    /// Bucket sums over `rows`; incomplete sessions contribute zero.
    pub totals: HourBreakdown,
    /// Number of incomplete sessions among `rows`.
    pub incomplete_sessions: usize,
}
