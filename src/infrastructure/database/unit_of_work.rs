//! Unit of Work Pattern Implementation
//!
//! Collects the writes of one business operation and commits them together.
//! Commit is the single choke point where the audit interceptor runs, so
//! every insert, update and removal is stamped the same way and removals are
//! persisted as tombstone updates.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;

use super::audit::{AuditInterceptor, EntityEntry, EntityState, TrackedEntity};
use crate::infrastructure::metrics;
use crate::infrastructure::repositories::{
    chat_room_member_repository, chat_room_repository, message_repository, user_repository,
};
use crate::shared::error::AppError;

/// Storage side of a unit of work.
///
/// `persist` receives an already audited write-set (no `Deleted` entries) and
/// must apply all of it or none of it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CommitSink: Send + Sync {
    async fn persist(&self, entries: &[EntityEntry]) -> Result<(), AppError>;
}

/// Pending write-set of a single request.
///
/// Dropping a unit of work without committing discards its writes.
pub struct UnitOfWork {
    sink: Arc<dyn CommitSink>,
    entries: Vec<EntityEntry>,
}

impl UnitOfWork {
    pub fn new(sink: Arc<dyn CommitSink>) -> Self {
        Self {
            sink,
            entries: Vec::new(),
        }
    }

    /// Track a new entity for insertion.
    pub fn add(&mut self, entity: impl Into<TrackedEntity>) {
        self.entries.push(EntityEntry::new(EntityState::Added, entity));
    }

    /// Track a changed entity for update.
    pub fn update(&mut self, entity: impl Into<TrackedEntity>) {
        self.entries
            .push(EntityEntry::new(EntityState::Modified, entity));
    }

    /// Track an entity for removal. It will be soft-deleted on commit.
    pub fn remove(&mut self, entity: impl Into<TrackedEntity>) {
        self.entries.push(EntityEntry::new(EntityState::Deleted, entity));
    }

    pub fn pending(&self) -> &[EntityEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Audit and persist every pending entry atomically.
    ///
    /// Returns the number of entries written.
    pub async fn commit(mut self) -> Result<usize, AppError> {
        if self.entries.is_empty() {
            return Ok(0);
        }

        AuditInterceptor::before_commit(&mut self.entries, Utc::now());

        let started = Instant::now();
        let result = self.sink.persist(&self.entries).await;
        metrics::record_commit(started.elapsed(), result.is_ok());

        match &result {
            Ok(()) => tracing::debug!(entries = self.entries.len(), "Unit of work committed"),
            Err(e) => tracing::debug!(error = %e, "Unit of work rejected"),
        }

        result.map(|()| self.entries.len())
    }
}

/// PostgreSQL commit sink: one transaction per commit.
#[derive(Clone)]
pub struct PgCommitSink {
    pool: PgPool,
}

impl PgCommitSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommitSink for PgCommitSink {
    async fn persist(&self, entries: &[EntityEntry]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            let conn = &mut *tx;
            match (entry.state, &entry.entity) {
                (EntityState::Added, TrackedEntity::User(u)) => user_repository::insert(conn, u).await?,
                (EntityState::Modified, TrackedEntity::User(u)) => user_repository::update(conn, u).await?,
                (EntityState::Added, TrackedEntity::ChatRoom(r)) => {
                    chat_room_repository::insert(conn, r).await?
                }
                (EntityState::Modified, TrackedEntity::ChatRoom(r)) => {
                    chat_room_repository::update(conn, r).await?
                }
                (EntityState::Added, TrackedEntity::ChatRoomMember(m)) => {
                    chat_room_member_repository::insert(conn, m).await?
                }
                (EntityState::Modified, TrackedEntity::ChatRoomMember(m)) => {
                    chat_room_member_repository::update(conn, m).await?
                }
                (EntityState::Added, TrackedEntity::Message(m)) => message_repository::insert(conn, m).await?,
                (EntityState::Modified, TrackedEntity::Message(m)) => {
                    message_repository::update(conn, m).await?
                }
                (EntityState::Deleted, entity) => {
                    // Rolled back when `tx` drops.
                    return Err(AppError::Internal(format!(
                        "unaudited delete reached storage for {}",
                        entity.table()
                    )));
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
