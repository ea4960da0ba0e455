//! End-to-end reconciliation.
//!
//! Runs normalization, deduplication, pairing and categorization over a batch
//! of raw rows against one holiday snapshot and one shift configuration.
//! The run is a pure function of its inputs: the same rows, holidays and
//! shift length always produce the same [`Reconciliation`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ShiftConfig;
use crate::models::{
    AuditTrace, AuditWarning, CategorizedSession, HolidayCalendar, Punch, PunchRow, SessionStatus,
};

use super::deduplication::{deduplicate_punches, group_by_employee};
use super::hours_breakdown::calculate_hour_breakdown;
use super::normalizer::normalize_rows;
use super::session_pairing::{find_multi_punch_days, pair_sessions};

/// The outcome of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Every session found, grouped by employee name and in time order
    /// within each employee.
    pub sessions: Vec<CategorizedSession>,
    /// Rows dropped for lacking a name or a parsable timestamp.
    pub dropped_rows: usize,
    /// Punches removed as repeats.
    pub duplicate_punches: usize,
    /// Standard shift length the run used.
    pub standard_hours: Decimal,
    /// Categorization steps and run warnings.
    pub audit_trace: AuditTrace,
}

/// Reconciles raw punch rows into categorized work sessions.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::reconcile;
/// use attendance_engine::config::ShiftConfig;
/// use attendance_engine::models::{HolidayCalendar, PunchRow};
/// use rust_decimal::Decimal;
///
/// let rows = vec![
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-04-23 08:00"),
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-04-23 08:02"),
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-04-23 20:00"),
///     PunchRow::new().with("Timestamp", "2026-04-23 20:00"),
/// ];
/// let holidays = HolidayCalendar::from_iso_strings(["2026-04-23"]).unwrap();
///
/// let run = reconcile(&rows, &holidays, &ShiftConfig::default());
/// assert_eq!(run.sessions.len(), 1);
/// assert_eq!(run.dropped_rows, 1);
/// assert_eq!(run.duplicate_punches, 1);
/// assert_eq!(run.sessions[0].breakdown.holiday_base_hours, Decimal::from(9));
/// assert_eq!(run.sessions[0].breakdown.holiday_overtime_hours, Decimal::from(3));
/// ```
pub fn reconcile(
    rows: &[PunchRow],
    holidays: &HolidayCalendar,
    shift: &ShiftConfig,
) -> Reconciliation {
    let normalized = normalize_rows(rows);
    let raw_count = normalized.punches.len();
    let groups = group_by_employee(normalized.punches);
    let employee_count = groups.len();

    let mut clean: Vec<Punch> = Vec::with_capacity(raw_count);
    let mut sessions: Vec<CategorizedSession> = Vec::new();
    let mut step_number: u32 = 1;

    for (employee, punches) in &groups {
        let deduplicated = deduplicate_punches(punches);
        debug!(
            employee = %employee,
            punches = punches.len(),
            kept = deduplicated.len(),
            "Deduplicated punches"
        );

        for session in pair_sessions(&deduplicated, holidays) {
            sessions.push(calculate_hour_breakdown(&session, shift, step_number));
            step_number += 1;
        }
        clean.extend(deduplicated);
    }

    let duplicate_punches = raw_count - clean.len();
    let warnings = collect_warnings(normalized.dropped_rows, &clean, &sessions);
    let steps = sessions.iter().map(|c| c.audit_step.clone()).collect();

    info!(
        rows = rows.len(),
        dropped_rows = normalized.dropped_rows,
        duplicate_punches,
        employees = employee_count,
        sessions = sessions.len(),
        holidays = holidays.len(),
        standard_hours = %shift.standard_hours(),
        "Reconciliation completed"
    );

    Reconciliation {
        sessions,
        dropped_rows: normalized.dropped_rows,
        duplicate_punches,
        standard_hours: shift.standard_hours(),
        audit_trace: AuditTrace { steps, warnings },
    }
}

fn collect_warnings(
    dropped_rows: usize,
    clean: &[Punch],
    sessions: &[CategorizedSession],
) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if dropped_rows > 0 {
        warnings.push(AuditWarning::new(
            "DROPPED_ROWS",
            format!("{dropped_rows} input row(s) had no employee name or no parsable timestamp"),
            "low",
        ));
    }

    for (employee, date, count) in find_multi_punch_days(clean) {
        warnings.push(AuditWarning::new(
            "MULTI_PUNCH_DAY",
            format!(
                "{employee} has {count} punches on {date}; sessions were paired in time order and may not match the intended shift"
            ),
            "medium",
        ));
    }

    for categorized in sessions
        .iter()
        .filter(|c| c.status == SessionStatus::Incomplete)
    {
        warnings.push(AuditWarning::new(
            "INCOMPLETE_SESSION",
            format!(
                "{} has no exit punch for the entry at {}",
                categorized.session.employee_name,
                categorized.session.entry_time.format("%Y-%m-%d %H:%M")
            ),
            "high",
        ));
    }

    warnings
}
