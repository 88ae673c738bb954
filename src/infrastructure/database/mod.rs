//! Database Module
//!
//! PostgreSQL connection pool, migrations, and the unit of work with its
//! commit-time audit interceptor.

pub mod audit;
pub mod unit_of_work;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

pub use audit::{AuditInterceptor, EntityEntry, EntityState, TrackedEntity};
pub use unit_of_work::{CommitSink, PgCommitSink, UnitOfWork};

#[cfg(test)]
pub use unit_of_work::MockCommitSink;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
