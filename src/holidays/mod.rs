//! Holiday calendar acquisition.
//!
//! The holiday calendar is owned outside the engine. This module defines the
//! [`HolidaySource`] seam the engine reads it through, an in-memory calendar
//! service that supports toggling dates, and a snapshot cache that falls back
//! to the last successfully fetched calendar when the source fails.

mod snapshot;
mod source;

pub use snapshot::HolidaySnapshotCache;
pub use source::{HolidaySource, HolidayStore, InMemoryHolidayStore};
