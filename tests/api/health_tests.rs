//! Health Check and Metrics Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.server.get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_memory_backend() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    response.assert_status(StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_expose_command_counters() {
    let app = TestApp::new();
    app.register(&unique_email()).await;

    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("register_user"), "metrics body: {}", text);
}
