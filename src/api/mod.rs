//! HTTP API module for the Attendance Reconciliation Engine.
//!
//! This module provides the REST API endpoints for reconciling attendance
//! punches, re-filtering the latest run and managing the holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::{ReconcileRequest, ToggleHolidayRequest};
pub use response::{
    ApiError, ApiErrorResponse, HolidaysResponse, ReconcileResponse, ToggleHolidayResponse,
};
pub use state::AppState;
