//! Chat room entity and repository trait.
//!
//! Maps to the `chat_rooms` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::{soft_deletable, AuditTimestamps};
use crate::shared::error::AppError;

/// Represents a chat room.
///
/// Maps to the `chat_rooms` table:
/// - id: UUID PRIMARY KEY
/// - owner_id: UUID NOT NULL REFERENCES users(id)
/// - name: VARCHAR(50) NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL
/// - deleted_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: Uuid,

    /// User that created the room
    pub owner_id: Uuid,

    /// Room name (5-50 characters)
    pub name: String,

    #[serde(flatten)]
    pub audit: AuditTimestamps,
}

soft_deletable!(ChatRoom);

impl ChatRoom {
    /// Create a new, not yet persisted room owned by `owner_id`.
    pub fn new(owner_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            audit: AuditTimestamps::default(),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Repository trait for ChatRoom reads. Only live rooms are returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRoomRepository: Send + Sync {
    /// Find a live chat room by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatRoom>, AppError>;

    /// List live rooms owned by a user, oldest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChatRoom>, AppError>;
}
