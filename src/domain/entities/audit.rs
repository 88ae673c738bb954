//! Lifecycle timestamps shared by every persisted entity.
//!
//! The commit-time interceptor only knows about [`Auditable`]; each entity
//! kind decides what a created/modified/deleted transition stamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reaction of an entity to the three unit-of-work transitions.
pub trait Auditable {
    /// The entity is being inserted.
    fn on_created(&mut self, now: DateTime<Utc>);

    /// The entity is being updated in place.
    fn on_modified(&mut self, now: DateTime<Utc>);

    /// The entity was removed; it will be persisted as a tombstone update.
    fn on_deleted(&mut self, now: DateTime<Utc>);

    /// Whether the entity is still visible to handler reads.
    fn is_live(&self) -> bool;
}

/// `created_at` / `updated_at` / `deleted_at` triad.
///
/// `deleted_at = None` means the row is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AuditTimestamps {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Default for AuditTimestamps {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Auditable for AuditTimestamps {
    fn on_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_modified(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn on_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Implements [`Auditable`] for an entity that embeds `AuditTimestamps` in
/// a field named `audit`.
macro_rules! soft_deletable {
    ($entity:ty) => {
        impl $crate::domain::entities::Auditable for $entity {
            fn on_created(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                $crate::domain::entities::Auditable::on_created(&mut self.audit, now)
            }

            fn on_modified(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                $crate::domain::entities::Auditable::on_modified(&mut self.audit, now)
            }

            fn on_deleted(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                $crate::domain::entities::Auditable::on_deleted(&mut self.audit, now)
            }

            fn is_live(&self) -> bool {
                $crate::domain::entities::Auditable::is_live(&self.audit)
            }
        }
    };
}

pub(crate) use soft_deletable;
