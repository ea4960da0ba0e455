//! Punch deduplication.
//!
//! Time clocks frequently record the same badge twice when an employee taps
//! more than once. This module groups punches per employee and collapses
//! repeats that fall within [`DEDUP_WINDOW_MINUTES`] of the last kept punch.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::models::Punch;

/// Punches this close to the previously kept punch are treated as noise.
pub const DEDUP_WINDOW_MINUTES: i64 = 5;

/// Groups punches by employee name, each group sorted ascending by time.
///
/// The sort is stable, so punches with identical timestamps keep their
/// input order. Groups are returned in employee-name order.
pub fn group_by_employee(punches: Vec<Punch>) -> BTreeMap<String, Vec<Punch>> {
    let mut groups: BTreeMap<String, Vec<Punch>> = BTreeMap::new();
    for punch in punches {
        groups
            .entry(punch.employee_name.clone())
            .or_default()
            .push(punch);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|p| p.timestamp);
    }
    groups
}

/// Removes repeated punches from one employee's time-sorted punch list.
///
/// The first punch is always kept. Each later punch is kept only if it is
/// more than [`DEDUP_WINDOW_MINUTES`] after the most recently *kept* punch;
/// a chain of taps one minute apart therefore collapses to its first tap.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::deduplicate_punches;
/// use attendance_engine::models::Punch;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     Punch::new("Ayse", at("2026-01-14 08:00:00")),
///     Punch::new("Ayse", at("2026-01-14 08:03:00")),
///     Punch::new("Ayse", at("2026-01-14 17:00:00")),
/// ];
///
/// let clean = deduplicate_punches(&punches);
/// assert_eq!(clean.len(), 2);
/// assert_eq!(clean[1].timestamp, at("2026-01-14 17:00:00"));
/// ```
pub fn deduplicate_punches(punches: &[Punch]) -> Vec<Punch> {
    let window = Duration::minutes(DEDUP_WINDOW_MINUTES);
    let mut kept: Vec<Punch> = Vec::with_capacity(punches.len());

    for punch in punches {
        match kept.last() {
            Some(last) if punch.timestamp - last.timestamp <= window => {}
            _ => kept.push(punch.clone()),
        }
    }

    kept
}
