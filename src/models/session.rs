//! Work session models.
//!
//! This module defines the [`WorkSession`] produced by pairing punches, the
//! [`HourBreakdown`] attached to it by the hours calculator, and the
//! [`CategorizedSession`] that combines the two.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DayType;

use super::AuditStep;

/// A reconstructed entry/exit work period for one employee.
///
/// Sessions are immutable once created; they are never merged or split.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayType;
/// use attendance_engine::models::WorkSession;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let session = WorkSession {
///     employee_name: "Ayse Demir".to_string(),
///     session_date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     entry_time: NaiveDateTime::parse_from_str("2026-01-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     exit_time: Some(NaiveDateTime::parse_from_str("2026-01-14 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
///     total_hours: Some(Decimal::from(9)),
///     day_type: DayType::Weekday,
///     is_overnight: false,
///     is_incomplete: false,
/// };
///
/// assert!(session.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The employee who worked the session.
    pub employee_name: String,
    /// Calendar date of the entry punch.
    pub session_date: NaiveDate,
    /// Time of the entry punch.
    pub entry_time: NaiveDateTime,
    /// Time of the paired exit punch, absent for incomplete sessions.
    pub exit_time: Option<NaiveDateTime>,
    /// Elapsed hours between entry and exit, absent for incomplete sessions.
    pub total_hours: Option<Decimal>,
    /// Day type of the entry date.
    pub day_type: DayType,
    /// True when the exit falls on a later calendar date than the entry.
    pub is_overnight: bool,
    /// True when no exit punch could be paired with the entry.
    pub is_incomplete: bool,
}

impl WorkSession {
    /// Returns true if the session has a paired exit.
    pub fn is_complete(&self) -> bool {
        !self.is_incomplete
    }

    /// Returns the status used for reporting.
    pub fn status(&self) -> SessionStatus {
        if self.is_incomplete {
            SessionStatus::Incomplete
        } else {
            SessionStatus::Complete
        }
    }
}

/// Reporting status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Entry and exit were paired; the session contributes to totals.
    Complete,
    /// No exit was found; the session is shown but contributes nothing.
    Incomplete,
}

/// Payroll hour buckets for a single session or a set of sessions.
///
/// Overtime-type buckets are rounded down to the half hour by the hours
/// calculator; the base buckets keep full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBreakdown {
    /// Weekday hours up to the standard shift length.
    pub normal_hours: Decimal,
    /// Weekday overtime plus all weekend hours.
    pub overtime_hours: Decimal,
    /// Holiday hours up to the standard shift length.
    pub holiday_base_hours: Decimal,
    /// Holiday hours beyond the standard shift length.
    pub holiday_overtime_hours: Decimal,
}

impl HourBreakdown {
    /// A breakdown with every bucket at zero.
    pub const ZERO: HourBreakdown = HourBreakdown {
        normal_hours: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        holiday_base_hours: Decimal::ZERO,
        holiday_overtime_hours: Decimal::ZERO,
    };

    /// Sum of all four buckets.
    pub fn total(&self) -> Decimal {
        self.normal_hours + self.overtime_hours + self.holiday_base_hours + self.holiday_overtime_hours
    }
}

impl Add for HourBreakdown {
    type Output = HourBreakdown;

    fn add(mut self, rhs: HourBreakdown) -> HourBreakdown {
        self += rhs;
        self
    }
}

impl AddAssign for HourBreakdown {
    fn add_assign(&mut self, rhs: HourBreakdown) {
        self.normal_hours += rhs.normal_hours;
        self.overtime_hours += rhs.overtime_hours;
        self.holiday_base_hours += rhs.holiday_base_hours;
        self.holiday_overtime_hours += rhs.holiday_overtime_hours;
    }
}

impl Sum for HourBreakdown {
    fn sum<I: Iterator<Item = HourBreakdown>>(iter: I) -> Self {
        iter.fold(HourBreakdown::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a HourBreakdown> for HourBreakdown {
    fn sum<I: Iterator<Item = &'a HourBreakdown>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A work session together with its hour breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedSession {
    /// The paired session.
    pub session: WorkSession,
    /// The payroll buckets; all zero when the session is incomplete.
    pub breakdown: HourBreakdown,
    /// Whether the session counts toward totals.
    pub status: SessionStatus,
    /// Record of the categorization decision.
    pub audit_step: AuditStep,
}
