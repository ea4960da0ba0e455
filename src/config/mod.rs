//! Configuration loading and management for the Attendance Reconciliation Engine.
//!
//! This module provides the per-run [`ShiftConfig`] and loads engine settings
//! and the seed holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Binding to {}", config.bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BIND_ADDRESS, DEFAULT_STANDARD_HOURS, EngineSettings, HolidayFile, ServerSettings,
    ShiftConfig,
};
