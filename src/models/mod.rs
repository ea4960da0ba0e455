//! Core data models for the Attendance Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod holiday_calendar;
mod punch;
mod report;
mod session;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use holiday_calendar::HolidayCalendar;
pub use punch::{Punch, PunchRow};
pub use report::{ReportFilter, ReportRow, ReportView};
pub use session::{CategorizedSession, HourBreakdown, SessionStatus, WorkSession};
