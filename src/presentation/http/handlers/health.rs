//! Health probes.
//!
//! `/health` and `/health/live` only prove the process answers. `/health/ready`
//! also round-trips the configured storage backend and returns 503 when it
//! cannot be reached.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::PgPool;

use crate::config::StorageBackend;
use crate::startup::AppState;

/// Probe round trips slower than this report `degraded`.
const DEGRADED_AFTER_MS: u64 = 100;

static STARTED: Lazy<(Instant, DateTime<Utc>)> = Lazy::new(|| (Instant::now(), Utc::now()));

/// Pin the uptime origin to process start rather than the first probe.
pub fn mark_started() {
    Lazy::force(&STARTED);
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn http_status(self) -> StatusCode {
        match self {
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::OK,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub storage: StorageCheck,
}

#[derive(Debug, Serialize)]
pub struct StorageCheck {
    pub status: HealthStatus,
    pub backend: StorageBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StorageCheck {
    fn memory() -> Self {
        Self {
            status: HealthStatus::Healthy,
            backend: StorageBackend::Memory,
            latency_ms: None,
            message: None,
        }
    }

    async fn postgres(pool: &PgPool) -> Self {
        let start = Instant::now();
        let outcome = sqlx::query("SELECT 1").execute(pool).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(_) => Self {
                status: status_for_latency(latency_ms),
                backend: StorageBackend::Postgres,
                latency_ms: Some(latency_ms),
                message: None,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                backend: StorageBackend::Postgres,
                latency_ms: None,
                message: Some(format!("Database unreachable: {}", e)),
            },
        }
    }
}

pub async fn health_check() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

pub async fn liveness() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "alive",
        version: None,
    })
}

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let storage = match &state.db {
        Some(pool) => StorageCheck::postgres(pool).await,
        None => StorageCheck::memory(),
    };

    let (started, started_at) = &*STARTED;
    let report = ReadinessReport {
        status: storage.status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: started.elapsed().as_secs(),
        started_at: started_at.to_rfc3339(),
        checks: ReadinessChecks { storage },
    };

    (report.status.http_status(), Json(report))
}

fn status_for_latency(latency_ms: u64) -> HealthStatus {
    if latency_ms < DEGRADED_AFTER_MS {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    }
}
