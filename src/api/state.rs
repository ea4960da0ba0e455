//! Application state for the Attendance Reconciliation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::calculation::Reconciliation;
use crate::config::ConfigLoader;
use crate::holidays::{HolidaySnapshotCache, HolidaySource, InMemoryHolidayStore};

/// Shared application state.
///
/// Holds the loaded configuration, the holiday calendar service and the
/// most recent reconciliation. The latest run is replaced whole on every
/// successful `/reconcile`; readers never see a partially written run.
pub struct AppState<S = InMemoryHolidayStore> {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// Holiday calendar service behind a last-known-good cache.
    holidays: Arc<HolidaySnapshotCache<S>>,
    /// The latest successful reconciliation, if any.
    latest: Arc<RwLock<Option<Arc<Reconciliation>>>>,
}

// Manual impl: cloning shares the Arcs and must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            holidays: Arc::clone(&self.holidays),
            latest: Arc::clone(&self.latest),
        }
    }
}

impl AppState<InMemoryHolidayStore> {
    /// Creates a new application state, seeding an in-memory holiday store
    /// from the configured calendar.
    pub fn new(config: ConfigLoader) -> Self {
        let store = InMemoryHolidayStore::new(config.holidays().clone());
        Self::with_holiday_source(config, store)
    }
}

impl<S: HolidaySource> AppState<S> {
    /// Creates a new application state reading holidays from `source`.
    pub fn with_holiday_source(config: ConfigLoader, source: S) -> Self {
        Self {
            config: Arc::new(config),
            holidays: Arc::new(HolidaySnapshotCache::new(source)),
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the holiday snapshot cache.
    pub fn holidays(&self) -> &HolidaySnapshotCache<S> {
        &self.holidays
    }

    /// Returns the latest stored reconciliation.
    pub async fn latest(&self) -> Option<Arc<Reconciliation>> {
        self.latest.read().await.clone()
    }

    /// Replaces the latest stored reconciliation.
    pub async fn store(&self, run: Reconciliation) -> Arc<Reconciliation> {
        let run = Arc::new(run);
        *self.latest.write().await = Some(Arc::clone(&run));
        run
    }
}
