//! Prometheus metrics.
//!
//! All collectors live in one registry under the `chat_manager` namespace:
//! HTTP traffic by matched route, command/query outcomes by request name, and
//! unit-of-work commit latency.

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

use crate::shared::error::AppError;

const NAMESPACE: &str = "chat_manager";

struct Collectors {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    commands: IntCounterVec,
    commit_duration: HistogramVec,
}

impl Collectors {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by route and status").namespace(NAMESPACE),
            &["method", "path", "status"],
        )?;
        let http_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .namespace(NAMESPACE)
                .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["method", "path"],
        )?;
        let commands = IntCounterVec::new(
            Opts::new("commands_total", "Dispatched commands and queries by outcome")
                .namespace(NAMESPACE),
            &["command", "outcome"],
        )?;
        let commit_duration = HistogramVec::new(
            HistogramOpts::new("uow_commit_duration_seconds", "Unit of work commit latency")
                .namespace(NAMESPACE)
                .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_duration.clone()))?;
        registry.register(Box::new(commands.clone()))?;
        registry.register(Box::new(commit_duration.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            commands,
            commit_duration,
        })
    }
}

// A registration failure disables metrics instead of taking the server down.
static COLLECTORS: Lazy<Option<Collectors>> = Lazy::new(|| match Collectors::build() {
    Ok(collectors) => Some(collectors),
    Err(e) => {
        tracing::error!(error = %e, "Metrics disabled: collector registration failed");
        None
    }
});

/// Encode every collector in the Prometheus text format.
pub fn gather_metrics() -> Result<String, AppError> {
    let collectors = COLLECTORS
        .as_ref()
        .ok_or_else(|| AppError::Internal("Metrics are unavailable".into()))?;

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&collectors.registry.gather(), &mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("Metrics are not valid UTF-8: {}", e)))
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(c) = COLLECTORS.as_ref() {
        c.http_requests
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        c.http_duration
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// `outcome` is `ok` or the error kind.
pub fn record_command(command: &str, outcome: &str) {
    if let Some(c) = COLLECTORS.as_ref() {
        c.commands.with_label_values(&[command, outcome]).inc();
    }
}

pub fn record_commit(elapsed: Duration, succeeded: bool) {
    if let Some(c) = COLLECTORS.as_ref() {
        let outcome = if succeeded { "ok" } else { "error" };
        c.commit_duration
            .with_label_values(&[outcome])
            .observe(elapsed.as_secs_f64());
    }
}
