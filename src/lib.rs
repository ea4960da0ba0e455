//! Attendance Reconciliation Engine
//!
//! This crate turns raw time-clock punches into paired work sessions and
//! categorizes every session's hours into normal, overtime, holiday-base and
//! holiday-overtime buckets against a standard shift length and a holiday
//! calendar. It also exposes the reconciliation over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod holidays;
pub mod models;
