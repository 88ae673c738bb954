//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/users", user_routes(state.clone()))
        .nest("/api/chatrooms", chat_room_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    match metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// User routes; only deletion requires a token
fn user_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", post(handlers::user::register_user))
        .route("/login", post(handlers::user::login_user))
        .route("/{user_id}", get(handlers::user::get_user));

    let protected = Router::new()
        .route("/{user_id}", delete(handlers::user::delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Chat room routes (protected)
fn chat_room_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::chat_room::register_chat_room))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
