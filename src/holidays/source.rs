//! Holiday calendar sources.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::EngineResult;
use crate::models::HolidayCalendar;

/// Somewhere a complete holiday calendar can be fetched from.
///
/// Each fetch returns a full, self-consistent snapshot; the engine never
/// sees a calendar that is being edited.
pub trait HolidaySource: Send + Sync {
    /// Fetches the current holiday calendar.
    fn fetch(&self) -> impl Future<Output = EngineResult<HolidayCalendar>> + Send;
}

/// A holiday calendar service that also accepts single-date toggles.
pub trait HolidayStore: HolidaySource {
    /// Adds the date if absent, removes it if present.
    ///
    /// Resolves to true if the date is a holiday after the toggle.
    fn toggle(&self, date: NaiveDate) -> impl Future<Output = EngineResult<bool>> + Send;
}

/// An in-memory holiday calendar service.
///
/// Serves the full calendar on read and lets callers toggle single dates.
///
/// # Example
///
/// ```
/// use attendance_engine::holidays::InMemoryHolidayStore;
/// use attendance_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryHolidayStore::new(HolidayCalendar::new());
/// let date = NaiveDate::from_ymd_opt(2026, 4, 23).unwrap();
///
/// assert!(store.toggle(date).await);
/// assert!(store.snapshot().await.contains(date));
///
/// assert!(!store.toggle(date).await);
/// assert!(store.snapshot().await.is_empty());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryHolidayStore {
    dates: RwLock<BTreeSet<NaiveDate>>,
}

impl InMemoryHolidayStore {
    /// Creates a store seeded with the given calendar.
    pub fn new(seed: HolidayCalendar) -> Self {
        Self {
            dates: RwLock::new(seed.iter().collect()),
        }
    }

    /// Returns the current calendar as an immutable snapshot.
    pub async fn snapshot(&self) -> HolidayCalendar {
        self.dates.read().await.iter().copied().collect()
    }

    /// Adds the date if absent, removes it if present.
    ///
    /// Returns true if the date is a holiday after the toggle.
    pub async fn toggle(&self, date: NaiveDate) -> bool {
        let mut dates = self.dates.write().await;
        let is_holiday = if dates.remove(&date) {
            false
        } else {
            dates.insert(date);
            true
        };
        info!(%date, is_holiday, total = dates.len(), "Holiday toggled");
        is_holiday
    }
}

impl HolidaySource for InMemoryHolidayStore {
    async fn fetch(&self) -> EngineResult<HolidayCalendar> {
        Ok(self.snapshot().await)
    }
}

impl HolidayStore for InMemoryHolidayStore {
    async fn toggle(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(InMemoryHolidayStore::toggle(self, date).await)
    }
}
