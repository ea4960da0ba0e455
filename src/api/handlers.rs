//! HTTP request handlers for the Attendance Reconciliation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{reconcile, summarize};
use crate::error::EngineError;
use crate::holidays::{HolidaySource, HolidayStore};
use crate::models::ReportFilter;

use super::request::{ReconcileRequest, ToggleHolidayRequest};
use super::response::{
    ApiError, ApiErrorResponse, HolidaysResponse, ReconcileResponse, ToggleHolidayResponse,
};
use super::state::AppState;

/// Version reported with every reconciliation run.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router<S: HolidayStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler::<S>))
        .route("/report", get(report_handler::<S>))
        .route("/holidays", get(list_holidays_handler::<S>))
        .route("/holidays/toggle", post(toggle_holiday_handler::<S>))
        .with_state(state)
}

/// Handler for POST /reconcile endpoint.
///
/// Runs a reconciliation over the posted rows against the current holiday
/// snapshot, stores it as the latest run and returns the filtered report.
async fn reconcile_handler<S: HolidayStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconcile request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(rejection_error(
                correlation_id,
                rejection,
            )));
        }
    };

    // An invalid shift length aborts before anything is stored
    let shift = match request.shift_config(state.config().shift_config()) {
        Ok(shift) => shift,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected standard shift length"
            );
            return error_response(err.into());
        }
    };

    let holidays = state.holidays().current().await;

    let start_time = Instant::now();
    let run = reconcile(&request.rows, &holidays, &shift);
    let filter = request.filter.unwrap_or_default();
    let view = summarize(&run.sessions, &filter);

    let response = ReconcileResponse {
        run_id: correlation_id,
        engine_version: ENGINE_VERSION.to_string(),
        dropped_rows: run.dropped_rows,
        duplicate_punches: run.duplicate_punches,
        standard_hours: run.standard_hours,
        rows: view.rows,
        totals: view.totals,
        incomplete_sessions: view.incomplete_sessions,
        audit_trace: run.audit_trace.clone(),
    };
    state.store(run).await;

    info!(
        correlation_id = %correlation_id,
        rows = response.rows.len(),
        total_hours = %response.totals.total(),
        incomplete_sessions = response.incomplete_sessions,
        duration_us = start_time.elapsed().as_micros(),
        "Reconciliation stored"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for GET /report endpoint.
///
/// Re-filters the latest stored run without recomputing it.
async fn report_handler<S: HolidayStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<ReportFilter>, QueryRejection>,
) -> Response {
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Invalid report query");
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let Some(run) = state.latest().await else {
        return error_response(EngineError::NoReconciliation.into());
    };

    let view = summarize(&run.sessions, &filter);
    info!(
        employee = filter.employee.as_deref().unwrap_or("*"),
        rows = view.rows.len(),
        "Report generated"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(view),
    )
        .into_response()
}

/// Handler for GET /holidays endpoint.
///
/// Reads the service directly; an unreachable calendar is reported rather
/// than masked by the reconciliation fallback.
async fn list_holidays_handler<S: HolidayStore>(State(state): State<AppState<S>>) -> Response {
    let calendar = match state.holidays().source().fetch().await {
        Ok(calendar) => calendar,
        Err(err) => {
            warn!(error = %err, "Holiday calendar unavailable");
            return error_response(err.into());
        }
    };
    let response = HolidaysResponse {
        holidays: calendar.to_iso_strings(),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /holidays/toggle endpoint.
async fn toggle_holiday_handler<S: HolidayStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ToggleHolidayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(rejection_error(
                correlation_id,
                rejection,
            )));
        }
    };

    let date = match request.parse_date() {
        Ok(date) => date,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected holiday toggle");
            return error_response(err.into());
        }
    };

    let is_holiday = match state.holidays().source().toggle(date).await {
        Ok(is_holiday) => is_holiday,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Holiday toggle failed");
            return error_response(err.into());
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ToggleHolidayResponse { date, is_holiday }),
    )
        .into_response()
}

/// Maps a JSON body rejection onto an API error.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
