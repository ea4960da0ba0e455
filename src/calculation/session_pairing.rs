//! Entry/exit session pairing.
//!
//! This module turns one employee's deduplicated, time-sorted punches into
//! [`WorkSession`]s. Pairing is greedy: a punch followed by another punch
//! less than [`MAX_SESSION_HOURS`] later forms a complete session with it,
//! and both are consumed. A punch with no such follower becomes an
//! incomplete session on its own.
//!
//! Pairing never looks at event labels and never considers alternative
//! pairings, so a day with a lunch-break punch pair is mispaired. Such days
//! are reported by [`find_multi_punch_days`] rather than corrected.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{HolidayCalendar, Punch, WorkSession};

use super::day_detection::get_day_type;

/// Longest gap, exclusive, between an entry and the punch paired as its exit.
pub const MAX_SESSION_HOURS: i64 = 24;

/// Pairs one employee's clean punches into work sessions.
///
/// `punches` must belong to a single employee, be sorted ascending by time
/// and already be deduplicated. Every punch ends up in exactly one session,
/// either as its entry or as its exit.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{pair_sessions, DayType};
/// use attendance_engine::models::{HolidayCalendar, Punch};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     Punch::new("Ayse", at("2026-01-14 22:00:00")),
///     Punch::new("Ayse", at("2026-01-15 06:00:00")),
///     Punch::new("Ayse", at("2026-01-17 08:00:00")),
/// ];
///
/// let sessions = pair_sessions(&punches, &HolidayCalendar::new());
/// assert_eq!(sessions.len(), 2);
///
/// assert!(sessions[0].is_overnight);
/// assert_eq!(sessions[0].total_hours, Some(Decimal::from(8)));
/// assert_eq!(sessions[0].day_type, DayType::Weekday);
///
/// assert!(sessions[1].is_incomplete);
/// assert_eq!(sessions[1].total_hours, None);
/// ```
pub fn pair_sessions(punches: &[Punch], holidays: &HolidayCalendar) -> Vec<WorkSession> {
    let max_gap = Duration::hours(MAX_SESSION_HOURS);
    let mut sessions = Vec::with_capacity(punches.len() / 2 + 1);
    let mut i = 0;

    while i < punches.len() {
        let entry = &punches[i];
        let exit = punches
            .get(i + 1)
            .filter(|next| next.timestamp - entry.timestamp < max_gap);

        match exit {
            Some(exit) => {
                sessions.push(complete_session(entry, exit, holidays));
                i += 2;
            }
            None => {
                sessions.push(incomplete_session(entry, holidays));
                i += 1;
            }
        }
    }

    sessions
}

/// Finds employee-days with more than two punches.
///
/// Greedy pairing assumes one entry and one exit per day. Days returned here
/// were paired anyway, but their sessions probably do not reflect the
/// intended shift. Results are `(employee, date, punch_count)` sorted by
/// employee then date.
pub fn find_multi_punch_days(punches: &[Punch]) -> Vec<(String, NaiveDate, usize)> {
    let mut counts: BTreeMap<(&str, NaiveDate), usize> = BTreeMap::new();
    for punch in punches {
        *counts
            .entry((punch.employee_name.as_str(), punch.date()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 2)
        .map(|((name, date), count)| (name.to_string(), date, count))
        .collect()
}

/// Nanoseconds in one hour.
const NANOS_PER_HOUR: i64 = 3_600_000_000_000;

/// Elapsed time between two instants in hours.
///
/// Computed in decimal from the full nanosecond difference, so sub-second
/// punch times count and 08:00 → 19:30 is exactly 11.5. Spans too long for
/// nanoseconds (centuries) fall back to whole seconds.
pub fn elapsed_hours(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(nanos) => Decimal::from(nanos) / Decimal::from(NANOS_PER_HOUR),
        None => Decimal::from(delta.num_seconds()) / Decimal::from(3600),
    }
}

fn complete_session(entry: &Punch, exit: &Punch, holidays: &HolidayCalendar) -> WorkSession {
    let session_date = entry.date();
    WorkSession {
        employee_name: entry.employee_name.clone(),
        session_date,
        entry_time: entry.timestamp,
        exit_time: Some(exit.timestamp),
        total_hours: Some(elapsed_hours(entry.timestamp, exit.timestamp)),
        day_type: get_day_type(session_date, holidays),
        is_overnight: exit.date() != session_date,
        is_incomplete: false,
    }
}

fn incomplete_session(entry: &Punch, holidays: &HolidayCalendar) -> WorkSession {
    let session_date = entry.date();
    WorkSession {
        employee_name: entry.employee_name.clone(),
        session_date,
        entry_time: entry.timestamp,
        exit_time: None,
        total_hours: None,
        day_type: get_day_type(session_date, holidays),
        is_overnight: false,
        is_incomplete: true,
    }
}
