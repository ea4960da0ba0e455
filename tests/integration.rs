//! Integration tests for the Attendance Reconciliation Engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Weekday sessions with overtime
//! - Weekend sessions and half-hour rounding loss
//! - Holiday sessions, including runtime holiday toggles
//! - Overnight sessions
//! - Punch deduplication
//! - Incomplete sessions
//! - Report filtering of the stored run
//! - Holiday calendar outages
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::error::{EngineError, EngineResult};
use attendance_engine::holidays::{HolidaySource, HolidayStore};
use attendance_engine::models::HolidayCalendar;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field serialized as a string.
fn hours(value: &Value) -> Decimal {
    let text = value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"));
    Decimal::from_str(text).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn punch(name: &str, timestamp: &str) -> Value {
    json!({ "Name": name, "Timestamp": timestamp })
}

async fn reconcile_rows(router: Router, rows: Vec<Value>) -> (StatusCode, Value) {
    post(router, "/reconcile", json!({ "rows": rows })).await
}

// =============================================================================
// Scenario A: Weekday with overtime
// =============================================================================

#[tokio::test]
async fn test_scenario_a_weekday_overtime() {
    let (status, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Ayse Demir", "2026-01-14 08:00:00"),
            punch("Ayse Demir", "2026-01-14 19:30:00"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["status"], "complete");
    assert_eq!(row["display_date"], "14.01.2026");
    assert_eq!(row["entry_time"], "08:00");
    assert_eq!(row["exit_time"], "19:30");
    assert_eq!(hours(&row["normal_hours"]), decimal("9"));
    assert_eq!(hours(&row["overtime_hours"]), decimal("2.5"));
    assert_eq!(hours(&row["total_hours"]), decimal("11.5"));
    assert_eq!(row["is_weekend"], false);
    assert_eq!(row["is_holiday"], false);
}

// =============================================================================
// Scenario B: Weekend rounding loss
// =============================================================================

#[tokio::test]
async fn test_scenario_b_weekend_rounding_loss() {
    let (status, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Ali Kaya", "2026-01-17 08:00:00"),
            punch("Ali Kaya", "2026-01-17 14:15:00"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["is_weekend"], true);
    assert_eq!(hours(&row["normal_hours"]), Decimal::ZERO);
    assert_eq!(hours(&row["overtime_hours"]), decimal("6"));
    assert_eq!(hours(&row["total_hours"]), decimal("6.25"));
}

// =============================================================================
// Scenario C: Holiday with overtime (holiday seeded from config)
// =============================================================================

#[tokio::test]
async fn test_scenario_c_holiday_overtime() {
    let (status, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Ayse Demir", "2026-04-23 08:00:00"),
            punch("Ayse Demir", "2026-04-23 20:00:00"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["is_holiday"], true);
    assert_eq!(hours(&row["holiday_base_hours"]), decimal("9"));
    assert_eq!(hours(&row["holiday_overtime_hours"]), decimal("3"));
    assert_eq!(hours(&row["normal_hours"]), Decimal::ZERO);
    assert_eq!(hours(&body["totals"]["holiday_overtime_hours"]), decimal("3"));
}

// =============================================================================
// Scenario D: Overnight session
// =============================================================================

#[tokio::test]
async fn test_scenario_d_overnight_session() {
    // Friday night into Saturday morning counts as a weekday session
    let (status, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Mehmet Yilmaz", "2026-01-16 22:00:00"),
            punch("Mehmet Yilmaz", "2026-01-17 06:00:00"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["is_overnight"], true);
    assert_eq!(row["date"], "2026-01-16");
    assert_eq!(row["is_weekend"], false);
    assert_eq!(hours(&row["normal_hours"]), decimal("8"));
    assert_eq!(hours(&row["overtime_hours"]), Decimal::ZERO);
}

// =============================================================================
// Scenario E: Deduplication
// =============================================================================

#[tokio::test]
async fn test_scenario_e_deduplication() {
    let (_, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Ayse Demir", "2026-01-14 08:00:00"),
            punch("Ayse Demir", "2026-01-14 08:03:00"),
            punch("Ali Kaya", "2026-01-14 08:00:00"),
            punch("Ali Kaya", "2026-01-14 08:10:00"),
        ],
    )
    .await;

    assert_eq!(body["duplicate_punches"], 1);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Ali's 10 minute gap survives dedup and pairs into a short session
    assert_eq!(rows[0]["employee_name"], "Ali Kaya");
    assert_eq!(rows[0]["status"], "complete");
    assert_eq!(rows[0]["exit_time"], "08:10");

    // Ayse's double tap collapses to a single, unpaired punch
    assert_eq!(rows[1]["employee_name"], "Ayse Demir");
    assert_eq!(rows[1]["status"], "incomplete");
}

// =============================================================================
// Scenario F: Incomplete session
// =============================================================================

#[tokio::test]
async fn test_scenario_f_incomplete_session() {
    let (status, body) = reconcile_rows(
        create_router_for_test(),
        vec![
            punch("Ayse Demir", "2026-01-14 08:00:00"),
            punch("Ayse Demir", "2026-01-15 08:00:00"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incomplete_sessions"], 2);
    for row in body["rows"].as_array().unwrap() {
        assert_eq!(row["status"], "incomplete");
        assert!(row["exit_time"].is_null());
        assert!(row["total_hours"].is_null());
        assert_eq!(hours(&row["normal_hours"]), Decimal::ZERO);
        assert_eq!(hours(&row["overtime_hours"]), Decimal::ZERO);
    }
    assert_eq!(hours(&body["totals"]["normal_hours"]), Decimal::ZERO);

    let warnings = body["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().all(|w| w["code"] == "INCOMPLETE_SESSION"));
    assert_eq!(warnings.len(), 2);
}

// =============================================================================
// Input handling
// =============================================================================

#[tokio::test]
async fn test_mixed_column_aliases_and_serial_timestamps() {
    let rows = vec![
        json!({ "Employee Name": "Ayse Demir", "Date Time": 46036.333333333336 }),
        json!({ "personnel": "Ayse Demir", "date": "14.01.2026", "time": "17:00" }),
        json!({ "Name": "", "Timestamp": "2026-01-14 08:00:00" }),
        json!({ "Name": "Ghost", "Timestamp": "not a time" }),
    ];

    let (status, body) = reconcile_rows(create_router_for_test(), rows).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dropped_rows"], 2);
    let row = &body["rows"][0];
    assert_eq!(row["entry_time"], "08:00");
    assert_eq!(row["exit_time"], "17:00");
    assert_eq!(hours(&row["normal_hours"]), decimal("9"));
}

#[tokio::test]
async fn test_custom_standard_hours() {
    let (status, body) = post(
        create_router_for_test(),
        "/reconcile",
        json!({
            "rows": [
                punch("Ayse Demir", "2026-01-14 08:00:00"),
                punch("Ayse Demir", "2026-01-14 19:30:00"),
            ],
            "standard_hours": "7.5"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hours(&body["standard_hours"]), decimal("7.5"));
    assert_eq!(hours(&body["rows"][0]["normal_hours"]), decimal("7.5"));
    assert_eq!(hours(&body["rows"][0]["overtime_hours"]), decimal("4"));
}

#[tokio::test]
async fn test_response_envelope() {
    let (_, body) = reconcile_rows(create_router_for_test(), vec![]).await;

    assert!(body["run_id"].as_str().is_some());
    assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["rows"], json!([]));
    assert_eq!(body["incomplete_sessions"], 0);
}

// =============================================================================
// Stored run and report filtering
// =============================================================================

fn two_employee_week() -> Vec<Value> {
    vec![
        punch("Ayse Demir", "2026-01-12 08:00:00"),
        punch("Ayse Demir", "2026-01-12 17:00:00"),
        punch("Ayse Demir", "2026-01-14 08:00:00"),
        punch("Ayse Demir", "2026-01-14 19:30:00"),
        punch("Ali Kaya", "2026-01-13 08:00:00"),
        punch("Ali Kaya", "2026-01-13 18:00:00"),
        punch("Ali Kaya", "2026-01-17 08:00:00"),
        punch("Ali Kaya", "2026-01-17 14:15:00"),
    ]
}

#[tokio::test]
async fn test_reconcile_with_filter() {
    let (_, body) = post(
        create_router_for_test(),
        "/reconcile",
        json!({
            "rows": two_employee_week(),
            "filter": { "employee": "Ali Kaya" }
        }),
    )
    .await;

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["employee_name"] == "Ali Kaya"));
    assert_eq!(hours(&body["totals"]["normal_hours"]), decimal("9"));
    assert_eq!(hours(&body["totals"]["overtime_hours"]), decimal("7"));
}

#[tokio::test]
async fn test_report_refilters_stored_run() {
    let router = create_router_for_test();
    let (status, _) = reconcile_rows(router.clone(), two_employee_week()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, all) = get(router.clone(), "/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["rows"].as_array().unwrap().len(), 4);
    assert_eq!(all["rows"][0]["employee_name"], "Ali Kaya");
    assert_eq!(hours(&all["totals"]["normal_hours"]), decimal("27"));
    assert_eq!(hours(&all["totals"]["overtime_hours"]), decimal("9.5"));

    let (status, range) = get(router, "/report?from=2026-01-13&to=2026-01-14").await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = range["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-01-13", "2026-01-14"]);
}

#[tokio::test]
async fn test_report_invalid_query_returns_400() {
    let router = create_router_for_test();
    reconcile_rows(router.clone(), two_employee_week()).await;

    let (status, body) = get(router, "/report?from=yesterday").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_shift_length_keeps_previous_run() {
    let router = create_router_for_test();
    reconcile_rows(router.clone(), two_employee_week()).await;

    let (status, body) = post(
        router.clone(),
        "/reconcile",
        json!({
            "rows": [punch("Other", "2026-01-14 08:00:00")],
            "standard_hours": "nine"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SHIFT_LENGTH");

    let (status, report) = get(router, "/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["rows"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_recompute_is_byte_identical() {
    let router = create_router_for_test();
    let (_, first) = reconcile_rows(router.clone(), two_employee_week()).await;
    let (_, second) = reconcile_rows(router, two_employee_week()).await;

    assert_eq!(first["rows"], second["rows"]);
    assert_eq!(first["totals"], second["totals"]);
    assert_eq!(first["audit_trace"], second["audit_trace"]);
}

// =============================================================================
// Holiday calendar service
// =============================================================================

#[tokio::test]
async fn test_list_holidays_sorted() {
    let (status, body) = get(create_router_for_test(), "/holidays").await;

    assert_eq!(status, StatusCode::OK);
    let holidays: Vec<&str> = body["holidays"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert!(holidays.contains(&"2026-04-23"));
    let mut sorted = holidays.clone();
    sorted.sort();
    assert_eq!(holidays, sorted);
}

#[tokio::test]
async fn test_toggle_holiday_changes_next_run() {
    let router = create_router_for_test();
    let rows = vec![
        punch("Ayse Demir", "2026-01-14 08:00:00"),
        punch("Ayse Demir", "2026-01-14 19:30:00"),
    ];

    let (status, toggled) = post(
        router.clone(),
        "/holidays/toggle",
        json!({ "date": "2026-01-14" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["date"], "2026-01-14");
    assert_eq!(toggled["is_holiday"], true);

    let (_, body) = reconcile_rows(router.clone(), rows.clone()).await;
    assert_eq!(body["rows"][0]["is_holiday"], true);
    assert_eq!(hours(&body["rows"][0]["holiday_base_hours"]), decimal("9"));
    assert_eq!(hours(&body["rows"][0]["holiday_overtime_hours"]), decimal("2.5"));

    let (_, toggled) = post(
        router.clone(),
        "/holidays/toggle",
        json!({ "date": "2026-01-14" }),
    )
    .await;
    assert_eq!(toggled["is_holiday"], false);

    let (_, body) = reconcile_rows(router, rows).await;
    assert_eq!(body["rows"][0]["is_holiday"], false);
    assert_eq!(hours(&body["rows"][0]["normal_hours"]), decimal("9"));
}

// =============================================================================
// Holiday calendar outages
// =============================================================================

/// Holiday service whose connection can be cut mid-test.
struct SwitchableCalendar {
    calendar: HolidayCalendar,
    online: Arc<AtomicBool>,
}

impl SwitchableCalendar {
    fn unavailable() -> EngineError {
        EngineError::HolidaySourceUnavailable {
            message: "connection refused".to_string(),
        }
    }
}

impl HolidaySource for SwitchableCalendar {
    async fn fetch(&self) -> EngineResult<HolidayCalendar> {
        if self.online.load(Ordering::SeqCst) {
            Ok(self.calendar.clone())
        } else {
            Err(Self::unavailable())
        }
    }
}

impl HolidayStore for SwitchableCalendar {
    async fn toggle(&self, _date: NaiveDate) -> EngineResult<bool> {
        Err(Self::unavailable())
    }
}

fn create_router_with_switchable_calendar(online: bool) -> (Router, Arc<AtomicBool>) {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let switch = Arc::new(AtomicBool::new(online));
    let source = SwitchableCalendar {
        calendar: HolidayCalendar::from_iso_strings(["2026-04-23"]).unwrap(),
        online: Arc::clone(&switch),
    };
    (
        create_router(AppState::with_holiday_source(config, source)),
        switch,
    )
}

fn holiday_shift() -> Vec<Value> {
    vec![
        punch("Ayse Demir", "2026-04-23 08:00:00"),
        punch("Ayse Demir", "2026-04-23 20:00:00"),
    ]
}

#[tokio::test]
async fn test_outage_falls_back_to_last_known_calendar() {
    let (router, online) = create_router_with_switchable_calendar(true);

    let (status, body) = reconcile_rows(router.clone(), holiday_shift()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"][0]["is_holiday"], true);

    online.store(false, Ordering::SeqCst);

    let (status, body) = reconcile_rows(router.clone(), holiday_shift()).await;
    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["is_holiday"], true);
    assert_eq!(hours(&row["holiday_base_hours"]), decimal("9"));
    assert_eq!(hours(&row["holiday_overtime_hours"]), decimal("3"));

    // The run was stored despite the outage
    let (status, report) = get(router, "/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["rows"][0]["is_holiday"], true);
}

#[tokio::test]
async fn test_outage_without_history_reconciles_without_holidays() {
    let (router, _online) = create_router_with_switchable_calendar(false);

    let (status, body) = reconcile_rows(router, holiday_shift()).await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["rows"][0];
    assert_eq!(row["is_holiday"], false);
    assert_eq!(hours(&row["normal_hours"]), decimal("9"));
    assert_eq!(hours(&row["overtime_hours"]), decimal("3"));
}

#[tokio::test]
async fn test_outage_is_reported_by_calendar_endpoints() {
    let (router, _online) = create_router_with_switchable_calendar(false);

    let (status, body) = get(router.clone(), "/holidays").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "HOLIDAY_SOURCE_UNAVAILABLE");

    let (status, body) = post(router, "/holidays/toggle", json!({ "date": "2026-01-14" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "HOLIDAY_SOURCE_UNAVAILABLE");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reconcile")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"rows\": ["))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_rows_of_wrong_type_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/reconcile",
        json!({ "rows": "not a list" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
