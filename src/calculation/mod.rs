//! Calculation logic for the Attendance Reconciliation Engine.
//!
//! This module contains every stage of a reconciliation run, leaves first:
//! punch normalization, deduplication, entry/exit session pairing
//! (including overnight sessions), day type detection, hour categorization
//! with half-hour overtime rounding, and report aggregation.

mod aggregation;
mod day_detection;
mod deduplication;
mod hours_breakdown;
mod normalizer;
mod pipeline;
mod session_pairing;

pub use aggregation::{filter_sessions, summarize};
pub use day_detection::{DayType, get_day_type};
pub use deduplication::{DEDUP_WINDOW_MINUTES, deduplicate_punches, group_by_employee};
pub use hours_breakdown::{calculate_hour_breakdown, round_down_half_hour};
pub use normalizer::{
    NormalizedPunches, normalize_row, normalize_rows, parse_timestamp, serial_to_datetime,
};
pub use pipeline::{Reconciliation, reconcile};
pub use session_pairing::{
    MAX_SESSION_HOURS, elapsed_hours, find_multi_punch_days, pair_sessions,
};
