use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;

use vitals_log_domain::entities::{Measurement, Reading};
use vitals_log_domain::testing::{MockHealthService, MockReadingsService};

use super::{empty_request, json_request, send};
use crate::api::routes::{create_app, AppServices};

fn app_with(readings: MockReadingsService) -> Router {
    let services = AppServices {
        readings: Arc::new(readings),
        health: Arc::new(MockHealthService::new()),
    };
    create_app(services, &[])
}

fn measurement(value: f64) -> Measurement {
    Measurement::new(value).unwrap()
}

fn stored_reading(id: i64) -> Reading {
    Reading {
        id,
        date: "2024-01-01".to_string(),
        time: "07:45".to_string(),
        systolic: measurement(118.0),
        diastolic: measurement(76.0),
        heart_rate: Some(measurement(64.0)),
        total_chol: None,
        hdl: None,
        ldl: None,
        trig: None,
        creatinine: None,
    }
}

#[tokio::test]
async fn test_list_returns_bare_array() {
    let app = app_with(MockReadingsService::new().with_readings(vec![stored_reading(5)]));

    let (status, body) = send(app, empty_request("GET", "/api/readings")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 5,
            "date": "2024-01-01",
            "time": "07:45",
            "systolic": 118,
            "diastolic": 76,
            "heartRate": 64,
            "totalChol": null,
            "hdl": null,
            "ldl": null,
            "trig": null,
            "creatinine": null
        }])
    );
}

#[tokio::test]
async fn test_create_returns_created_reading() {
    let app = app_with(MockReadingsService::new());

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/readings",
            json!({"date": "2024-01-01", "systolic": "120", "diastolic": 80}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["systolic"], json!(120));
    assert_eq!(body["diastolic"], json!(80));
    assert_eq!(body["heartRate"], json!(null));
    assert!(body["id"].is_i64());
    assert!(body.get("ok").is_none());
}

#[tokio::test]
async fn test_create_validation_failure_is_bad_request() {
    let app = app_with(MockReadingsService::new().with_validation_failure());

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/readings",
            json!({"date": "2024-01-01", "systolic": 120, "diastolic": 80}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_malformed_body_is_bad_request() {
    let app = app_with(MockReadingsService::new());

    let (status, body) = send(
        app,
        json_request("POST", "/api/readings", json!({"date": "2024-01-01", "systolic": true})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_duplicate_id_is_conflict() {
    let app = app_with(MockReadingsService::new().with_readings(vec![stored_reading(5)]));

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/readings",
            json!({"id": 5, "date": "2024-01-02", "systolic": 120, "diastolic": 80}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_create_storage_failure_hides_detail() {
    let app = app_with(MockReadingsService::new().with_storage_failure());

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/readings",
            json!({"date": "2024-01-01", "systolic": 120, "diastolic": 80}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "An unexpected error occurred");
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app_with(MockReadingsService::new().with_readings(vec![stored_reading(5)]));

    let (status, body) = send(app.clone(), empty_request("DELETE", "/api/readings/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": 5}));

    let (status, body) = send(app, empty_request("DELETE", "/api/readings/5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_delete_non_integer_id_is_bad_request() {
    let app = app_with(MockReadingsService::new());

    let (status, body) = send(app, empty_request("DELETE", "/api/readings/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}
