//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait, plus the row
//! writers the commit sink uses. Maps between the database schema and the
//! domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::map_write_error;
use crate::domain::{AuditTimestamps, User, UserRepository};
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    nick_name: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            nick_name: self.nick_name,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            audit: AuditTimestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
                deleted_at: self.deleted_at,
            },
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nick_name, first_name, last_name, email, password_hash,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, nick_name, first_name, last_name, email, password_hash,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE lower(email) = lower($1) AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE lower(email) = lower($1) AND deleted_at IS NULL)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}

/// Insert a user row. Duplicate live emails surface as `Conflict`.
pub(crate) async fn insert(conn: &mut PgConnection, user: &User) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, nick_name, first_name, last_name, email, password_hash,
                           created_at, updated_at, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(user.id)
    .bind(&user.nick_name)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.audit.created_at)
    .bind(user.audit.updated_at)
    .bind(user.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

/// Update a live user row, including a soft delete.
///
/// Tombstoned rows are never touched again, so a second soft delete of the
/// same user reports `NotFound`.
pub(crate) async fn update(conn: &mut PgConnection, user: &User) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET nick_name = $2,
            first_name = $3,
            last_name = $4,
            email = $5,
            password_hash = $6,
            updated_at = $7,
            deleted_at = $8
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(user.id)
    .bind(&user.nick_name)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.audit.updated_at)
    .bind(user.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User with ID '{}' not found.", user.id)));
    }

    Ok(())
}
