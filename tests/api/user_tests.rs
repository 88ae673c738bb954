//! User API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{register_body, unique_email, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_register_returns_camel_case_user_without_password() {
    let app = TestApp::new();
    let email = unique_email();

    let body = app.register(&email).await;

    assert_eq!(body["nickName"], "tester");
    assert_eq!(body["firstName"], "Test");
    assert_eq!(body["lastName"], "User");
    assert_eq!(body["email"], email.as_str());
    assert!(body["id"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts_ignoring_case() {
    let app = TestApp::new();
    app.register("dup@example.com").await;

    let response = app
        .server
        .post("/api/users")
        .json(&register_body("DUP@example.com"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10005);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/users")
        .json(&json!({
            "nickName": "ab",
            "firstName": "Test",
            "lastName": "User",
            "email": "not-an-email",
            "password": "weak",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10007);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["email", "nickName", "password"]);
    assert_eq!(app.store.user_row_count(), 0);
}

#[tokio::test]
async fn test_login_returns_token_and_identity() {
    let app = TestApp::new();
    let email = unique_email();
    let user = app.register(&email).await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["id"], user["id"]);
    assert_eq!(body["nickName"], "tester");
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    let email = unique_email();
    app.register(&email).await;

    let wrong_password = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": email, "password": "WrongPassword1!" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": unique_email(), "password": TEST_PASSWORD }))
        .await;

    wrong_password.assert_status(StatusCode::NOT_FOUND);
    unknown_email.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_email.json::<Value>()
    );
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let user = app.register(&unique_email()).await;
    let id = user["id"].as_str().expect("id");

    let response = app.server.get(&format!("/api/users/{}", id)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), user);
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], 10001);
}

#[tokio::test]
async fn test_get_with_malformed_id_is_rejected() {
    let app = TestApp::new();

    let response = app.server.get("/api/users/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_requires_token() {
    let app = TestApp::new();
    let user = app.register(&unique_email()).await;
    let id = user["id"].as_str().expect("id");

    let response = app.server.delete(&format!("/api/users/{}", id)).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_rejects_garbage_token() {
    let app = TestApp::new();
    let user = app.register(&unique_email()).await;
    let id = user["id"].as_str().expect("id");

    let response = app
        .server
        .delete(&format!("/api/users/{}", id))
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_other_user_is_forbidden() {
    let app = TestApp::new();
    let (_, token) = app.signed_up(&unique_email()).await;
    let victim = app.register(&unique_email()).await;
    let victim_id = victim["id"].as_str().expect("id");

    let response = app
        .server
        .delete(&format!("/api/users/{}", victim_id))
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    app.server
        .get(&format!("/api/users/{}", victim_id))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_self_soft_deletes() {
    let app = TestApp::new();
    let email = unique_email();
    let (id, token) = app.signed_up(&email).await;

    let response = app
        .server
        .delete(&format!("/api/users/{}", id))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/users/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let uuid = id.parse().expect("uuid");
    let tombstone = app.store.user_including_deleted(uuid).expect("row kept");
    assert!(tombstone.audit.deleted_at.is_some());
    assert!(tombstone.audit.updated_at >= tombstone.audit.created_at);

    // The token is still valid but its subject is gone.
    app.server
        .delete(&format!("/api/users/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_email_can_be_reused_after_delete() {
    let app = TestApp::new();
    let email = unique_email();
    let (id, token) = app.signed_up(&email).await;
    app.server
        .delete(&format!("/api/users/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let again = app.register(&email).await;

    assert_ne!(again["id"].as_str(), Some(id.as_str()));
    assert_eq!(app.store.user_row_count(), 2);
}
