//! Last-known-good holiday snapshot cache.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::HolidayCalendar;

use super::source::HolidaySource;

/// Wraps a [`HolidaySource`] and remembers the last calendar it returned.
///
/// A failed fetch never aborts a reconciliation: [`current`](Self::current)
/// falls back to the last successful snapshot, or to an empty calendar if
/// the source has never answered. Weekday and weekend classification stay
/// correct either way; only holiday detection degrades.
#[derive(Debug)]
pub struct HolidaySnapshotCache<S> {
    source: S,
    last_known: RwLock<Option<HolidayCalendar>>,
}

impl<S: HolidaySource> HolidaySnapshotCache<S> {
    /// Creates a cache with no snapshot yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_known: RwLock::new(None),
        }
    }

    /// Returns the wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches a fresh snapshot, falling back to the last known one.
    pub async fn current(&self) -> HolidayCalendar {
        match self.source.fetch().await {
            Ok(calendar) => {
                debug!(holidays = calendar.len(), "Holiday snapshot refreshed");
                *self.last_known.write().await = Some(calendar.clone());
                calendar
            }
            Err(err) => {
                let fallback = self.last_known.read().await.clone();
                warn!(
                    error = %err,
                    has_fallback = fallback.is_some(),
                    "Holiday fetch failed; using last known snapshot"
                );
                fallback.unwrap_or_default()
            }
        }
    }

    /// Returns the last successfully fetched snapshot, if any.
    pub async fn last_known(&self) -> Option<HolidayCalendar> {
        self.last_known.read().await.clone()
    }
}
