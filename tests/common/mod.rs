//! Common Test Utilities
//!
//! Shared helpers and fixtures. Every test gets its own in-memory store, so
//! tests never see each other's rows.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use chat_manager::config::Settings;
use chat_manager::infrastructure::memory::MemoryStore;
use chat_manager::startup::{build_router, AppState};

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Test application backed by the in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let settings = Settings::local("integration-test-secret-".repeat(2));
        let router = build_router(AppState::in_memory(store.clone(), settings));

        Self {
            server: TestServer::new(router).expect("test server"),
            store,
        }
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str) -> Value {
        let response = self
            .server
            .post("/api/users")
            .json(&register_body(email))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Log in with the default password and return the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .server
            .post("/api/users/login")
            .json(&json!({ "email": email, "password": TEST_PASSWORD }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Register then log in; returns (user id, token).
    pub async fn signed_up(&self, email: &str) -> (String, String) {
        let user = self.register(email).await;
        let id = user["id"].as_str().expect("id").to_string();
        let token = self.login(email).await;
        (id, token)
    }
}

pub fn register_body(email: &str) -> Value {
    json!({
        "nickName": "tester",
        "firstName": "Test",
        "lastName": "User",
        "email": email,
        "password": TEST_PASSWORD,
    })
}

/// Generate a unique test email
pub fn unique_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}
