//! Hour categorization.
//!
//! This module converts a session's elapsed time into the four payroll
//! buckets. The rules depend on the session's day type:
//!
//! - **Holiday:** hours up to the standard shift are holiday-base hours; the
//!   remainder is holiday overtime.
//! - **Weekend:** every hour is overtime. There is no normal bucket and the
//!   standard shift does not apply.
//! - **Weekday:** hours up to the standard shift are normal hours; the
//!   remainder is overtime.
//!
//! Every overtime-type bucket is rounded *down* to the half hour. Normal and
//! holiday-base hours keep full precision. The loss this causes is at most
//! just under half an hour per session and is intentional.

use rust_decimal::Decimal;

use crate::config::ShiftConfig;
use crate::models::{AuditStep, CategorizedSession, HourBreakdown, SessionStatus, WorkSession};

use super::day_detection::DayType;

/// Rounds hours down to the nearest half hour.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::round_down_half_hour;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round_down_half_hour(dec("6.25")), dec("6.0"));
/// assert_eq!(round_down_half_hour(dec("2.5")), dec("2.5"));
/// assert_eq!(round_down_half_hour(dec("2.99")), dec("2.5"));
/// ```
pub fn round_down_half_hour(hours: Decimal) -> Decimal {
    let two = Decimal::from(2);
    (hours * two).floor() / two
}

/// Categorizes a session's hours into payroll buckets.
///
/// Incomplete sessions produce an all-zero breakdown with status
/// [`SessionStatus::Incomplete`], so they show up in reports without
/// touching totals.
///
/// # Arguments
///
/// * `session` - The paired session to categorize
/// * `shift` - The standard shift length for this run
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ## Weekday with overtime
///
/// ```
/// use attendance_engine::calculation::{calculate_hour_breakdown, pair_sessions};
/// use attendance_engine::config::ShiftConfig;
/// use attendance_engine::models::{HolidayCalendar, Punch};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// // 2026-01-14 is a Wednesday
/// let punches = vec![
///     Punch::new("Ayse", at("2026-01-14 08:00:00")),
///     Punch::new("Ayse", at("2026-01-14 19:30:00")),
/// ];
/// let session = &pair_sessions(&punches, &HolidayCalendar::new())[0];
///
/// let result = calculate_hour_breakdown(session, &ShiftConfig::default(), 1);
/// assert_eq!(result.breakdown.normal_hours, Decimal::from(9));
/// assert_eq!(result.breakdown.overtime_hours, Decimal::from_str("2.5").unwrap());
/// ```
///
/// ## Weekend rounding loss
///
/// ```
/// use attendance_engine::calculation::{calculate_hour_breakdown, pair_sessions};
/// use attendance_engine::config::ShiftConfig;
/// use attendance_engine::models::{HolidayCalendar, Punch};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// // 2026-01-17 is a Saturday; 6.25 hours worked
/// let punches = vec![
///     Punch::new("Ayse", at("2026-01-17 08:00:00")),
///     Punch::new("Ayse", at("2026-01-17 14:15:00")),
/// ];
/// let session = &pair_sessions(&punches, &HolidayCalendar::new())[0];
///
/// let result = calculate_hour_breakdown(session, &ShiftConfig::default(), 1);
/// assert_eq!(result.breakdown.overtime_hours, Decimal::from(6));
/// assert_eq!(result.breakdown.normal_hours, Decimal::ZERO);
/// ```
pub fn calculate_hour_breakdown(
    session: &WorkSession,
    shift: &ShiftConfig,
    step_number: u32,
) -> CategorizedSession {
    let standard = shift.standard_hours();

    let total = match (session.is_incomplete, session.total_hours) {
        (false, Some(total)) => total,
        _ => {
            return CategorizedSession {
                session: session.clone(),
                breakdown: HourBreakdown::ZERO,
                status: SessionStatus::Incomplete,
                audit_step: incomplete_audit_step(session, step_number),
            };
        }
    };

    let (breakdown, rule_id, rule_name, reasoning) = match session.day_type {
        DayType::Holiday => {
            let breakdown = HourBreakdown {
                holiday_base_hours: total.min(standard),
                holiday_overtime_hours: overtime_beyond(total, standard),
                ..HourBreakdown::ZERO
            };
            let reasoning = threshold_reasoning(total, standard, "holiday");
            (breakdown, "holiday_hours", "Holiday Hours", reasoning)
        }
        DayType::Weekend => {
            let breakdown = HourBreakdown {
                overtime_hours: round_down_half_hour(total),
                ..HourBreakdown::ZERO
            };
            let reasoning = format!(
                "{} hours worked on a weekend, all counted as overtime rounded down to the half hour",
                total.normalize()
            );
            (breakdown, "weekend_hours", "Weekend Hours", reasoning)
        }
        DayType::Weekday => {
            let breakdown = HourBreakdown {
                normal_hours: total.min(standard),
                overtime_hours: overtime_beyond(total, standard),
                ..HourBreakdown::ZERO
            };
            let reasoning = threshold_reasoning(total, standard, "weekday");
            (breakdown, "weekday_hours", "Weekday Hours", reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "employee_name": session.employee_name,
            "session_date": session.session_date.to_string(),
            "day_type": session.day_type,
            "total_hours": total.normalize().to_string(),
            "standard_hours": standard.normalize().to_string(),
        }),
        output: breakdown_json(&breakdown),
        reasoning,
    };

    CategorizedSession {
        session: session.clone(),
        breakdown,
        status: SessionStatus::Complete,
        audit_step,
    }
}

/// Hours past the standard shift, rounded down to the half hour.
fn overtime_beyond(total: Decimal, standard: Decimal) -> Decimal {
    if total > standard {
        round_down_half_hour(total - standard)
    } else {
        Decimal::ZERO
    }
}

fn threshold_reasoning(total: Decimal, standard: Decimal, day: &str) -> String {
    if total > standard {
        format!(
            "{} hours worked on a {} exceeds {} hour standard shift; excess rounded down to the half hour",
            total.normalize(),
            day,
            standard.normalize()
        )
    } else {
        format!(
            "{} hours worked on a {} is within {} hour standard shift, no overtime",
            total.normalize(),
            day,
            standard.normalize()
        )
    }
}

fn incomplete_audit_step(session: &WorkSession, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "incomplete_session".to_string(),
        rule_name: "Incomplete Session".to_string(),
        input: serde_json::json!({
            "employee_name": session.employee_name,
            "session_date": session.session_date.to_string(),
            "entry_time": session.entry_time.format("%H:%M:%S").to_string(),
        }),
        output: breakdown_json(&HourBreakdown::ZERO),
        reasoning: "No exit punch within 24 hours of entry; session excluded from totals"
            .to_string(),
    }
}

fn breakdown_json(breakdown: &HourBreakdown) -> serde_json::Value {
    serde_json::json!({
        "normal_hours": breakdown.normal_hours.normalize().to_string(),
        "overtime_hours": breakdown.overtime_hours.normalize().to_string(),
        "holiday_base_hours": breakdown.holiday_base_hours.normalize().to_string(),
        "holiday_overtime_hours": breakdown.holiday_overtime_hours.normalize().to_string(),
    })
}
