//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::{soft_deletable, AuditTimestamps};
use crate::shared::error::AppError;

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - nick_name: VARCHAR(20) NOT NULL
/// - first_name: VARCHAR(50) NOT NULL
/// - last_name: VARCHAR(50) NOT NULL
/// - email: VARCHAR(255) NOT NULL (unique among live rows, case-insensitive)
/// - password_hash: TEXT NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL
/// - deleted_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Public handle (3-20 characters)
    pub nick_name: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    #[serde(flatten)]
    pub audit: AuditTimestamps,
}

soft_deletable!(User);

impl User {
    /// Create a new, not yet persisted user with a fresh id.
    pub fn new(
        nick_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            nick_name: nick_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            audit: AuditTimestamps::default(),
        }
    }

    /// Case-insensitive email comparison used by the uniqueness rule.
    ///
    /// Full Unicode lowercasing, matching `lower(email)` in Postgres.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Repository trait for User reads.
///
/// Every method only sees live users (`deleted_at IS NULL`). Writes go
/// through the unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Find a live user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Check if an email address is held by a live user.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
}
