use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;

use vitals_log_domain::health::ComponentStatus;
use vitals_log_domain::testing::{MockHealthService, MockReadingsService};

use super::{empty_request, send};
use crate::api::handlers::health::LIVENESS_MESSAGE;
use crate::api::routes::{create_app, AppServices};

fn app_with(health: MockHealthService) -> Router {
    let services = AppServices {
        readings: Arc::new(MockReadingsService::new()),
        health: Arc::new(health),
    };
    create_app(services, &[])
}

#[tokio::test]
async fn test_root_liveness_text() {
    let (status, body) = send(app_with(MockHealthService::new()), empty_request("GET", "/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, LIVENESS_MESSAGE);
}

#[tokio::test]
async fn test_health_ok() {
    let (status, body) = send(app_with(MockHealthService::new()), empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["storage"]["status"], "ok");
    assert_eq!(body["components"]["api"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_storage() {
    let health = MockHealthService::new().with_storage_status(ComponentStatus::Degraded);

    let (status, body) = send(app_with(health), empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["storage"]["status"], "degraded");
    assert!(body["components"]["storage"]["message"].is_string());
}

#[tokio::test]
async fn test_health_unhealthy_storage() {
    let health = MockHealthService::new().with_storage_status(ComponentStatus::Unhealthy);

    let (status, body) = send(app_with(health), empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
}
