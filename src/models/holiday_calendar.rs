//! Holiday calendar snapshot.
//!
//! This module contains the [`HolidayCalendar`] type, an immutable snapshot of
//! the externally maintained set of holiday dates. A reconciliation run reads
//! exactly one snapshot from start to finish.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A read-only set of holiday dates.
///
/// Serializes as a sorted list of ISO `YYYY-MM-DD` strings.
///
/// # Example
///
/// ```
/// use attendance_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::from_iso_strings(["2026-01-01", "2026-04-23"]).unwrap();
///
/// assert!(calendar.contains(NaiveDate::from_ymd_opt(2026, 4, 23).unwrap()));
/// assert!(!calendar.contains(NaiveDate::from_ymd_opt(2026, 4, 24).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a calendar from ISO `YYYY-MM-DD` strings.
    ///
    /// Surrounding whitespace is ignored. Any other malformed entry fails the
    /// whole snapshot with [`EngineError::InvalidHolidayDate`] rather than
    /// silently producing a partial calendar.
    pub fn from_iso_strings<I, S>(values: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = BTreeSet::new();
        for value in values {
            let value = value.as_ref().trim();
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                EngineError::InvalidHolidayDate {
                    value: value.to_string(),
                }
            })?;
            dates.insert(date);
        }
        Ok(Self { dates })
    }

    /// Returns true if the given date is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns the number of holidays in the snapshot.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the snapshot holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates the holiday dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Returns the holidays as ISO strings in ascending order.
    pub fn to_iso_strings(&self) -> Vec<String> {
        self.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}
