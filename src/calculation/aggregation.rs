//! Report filtering and aggregation.
//!
//! Filtering and summation are recomputed from scratch on every call; no
//! state is carried between invocations.

use crate::models::{CategorizedSession, HourBreakdown, ReportFilter, ReportRow, ReportView, SessionStatus};

/// Selects the sessions that pass `filter`, sorted by employee name, then
/// session date, then entry time.
pub fn filter_sessions<'a>(
    sessions: &'a [CategorizedSession],
    filter: &ReportFilter,
) -> Vec<&'a CategorizedSession> {
    let mut selected: Vec<&CategorizedSession> = sessions
        .iter()
        .filter(|c| filter.matches(&c.session.employee_name, c.session.session_date))
        .collect();

    selected.sort_by(|a, b| {
        a.session
            .employee_name
            .cmp(&b.session.employee_name)
            .then(a.session.session_date.cmp(&b.session.session_date))
            .then(a.session.entry_time.cmp(&b.session.entry_time))
    });

    selected
}

/// Builds the filtered detail rows and their four-bucket totals.
///
/// Incomplete sessions appear in the rows with zero buckets and are counted
/// in `incomplete_sessions`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{reconcile, summarize};
/// use attendance_engine::config::ShiftConfig;
/// use attendance_engine::models::{HolidayCalendar, PunchRow, ReportFilter};
/// use rust_decimal::Decimal;
///
/// let rows = vec![
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-01-14 08:00"),
///     PunchRow::new().with("Name", "Ayse").with("Timestamp", "2026-01-14 19:30"),
///     PunchRow::new().with("Name", "Ali").with("Timestamp", "2026-01-17 08:00"),
/// ];
/// let run = reconcile(&rows, &HolidayCalendar::new(), &ShiftConfig::default());
///
/// let view = summarize(&run.sessions, &ReportFilter::default());
/// assert_eq!(view.rows.len(), 2);
/// assert_eq!(view.rows[0].employee_name, "Ali");
/// assert_eq!(view.incomplete_sessions, 1);
/// assert_eq!(view.totals.normal_hours, Decimal::from(9));
/// ```
pub fn summarize(sessions: &[CategorizedSession], filter: &ReportFilter) -> ReportView {
    let selected = filter_sessions(sessions, filter);

    let totals: HourBreakdown = selected.iter().map(|c| c.breakdown).sum();
    let incomplete_sessions = selected
        .iter()
        .filter(|c| c.status == SessionStatus::Incomplete)
        .count();
    let rows = selected.into_iter().map(ReportRow::from).collect();

    ReportView {
        rows,
        totals,
        incomplete_sessions,
    }
}
