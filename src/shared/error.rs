//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Client-facing projection of the error: HTTP status, stable numeric
    /// code and a message that is safe to expose.
    ///
    /// Internal and database failures collapse to a generic message.
    pub fn client_facing(&self) -> (StatusCode, u16, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, 10003, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, 10004, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, 10005, msg.clone()),
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                10007,
                "One or more validation errors occurred".into(),
            ),
            AppError::Internal(_) | AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                10000,
                "Internal server error".into(),
            ),
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Validation(_) => "validation",
            AppError::Internal(_) => "internal",
            AppError::Database(_) => "database",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.client_facing();

        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Database(e) => tracing::error!("Database error: {}", e),
            AppError::Validation(errors) => {
                tracing::warn!(errors = %summarize(errors), "Validation failed")
            }
            other => tracing::warn!(kind = other.kind(), "{}", other),
        }

        let errors = match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_status_per_kind() {
        let cases = vec![
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, 10001),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, 10002),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, 10003),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, 10004),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, 10005),
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST, 10007),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                10000,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
                10000,
            ),
        ];

        for (error, status, code) in cases {
            let (actual_status, actual_code, _) = error.client_facing();
            assert_eq!(actual_status, status, "status for {:?}", error);
            assert_eq!(actual_code, code, "code for {:?}", error);
        }
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let error = AppError::Internal("connection string postgres://secret".into());
        let (_, _, message) = error.client_facing();

        assert_eq!(message, "Internal server error");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let error = AppError::NotFound("Invalid email or password.".into());
        let (_, _, message) = error.client_facing();

        assert_eq!(message, "Invalid email or password.");
    }

    #[test]
    fn test_validation_display_lists_every_field() {
        let error = AppError::Validation(vec![
            FieldError::new("email", "Invalid email format"),
            FieldError::new("nickName", "Nickname must be 3-20 characters"),
        ]);

        let text = error.to_string();
        assert!(text.contains("email: Invalid email format"));
        assert!(text.contains("nickName: Nickname must be 3-20 characters"));
    }

    #[test]
    fn test_validation_response_carries_field_errors() {
        let error = AppError::Validation(vec![FieldError::new("name", "too short")]);
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
