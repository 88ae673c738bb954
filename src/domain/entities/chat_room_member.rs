//! Chat room membership entity and repository trait.
//!
//! Maps to the `chat_room_members` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::Auditable;
use crate::shared::error::AppError;

/// Represents a user's membership in a chat room.
///
/// Maps to the `chat_room_members` table:
/// - user_id: UUID NOT NULL REFERENCES users(id) (composite PK)
/// - chat_room_id: UUID NOT NULL REFERENCES chat_rooms(id) (composite PK)
/// - joined_at: TIMESTAMPTZ NOT NULL
/// - left_at: TIMESTAMPTZ NULL
///
/// Memberships have no `deleted_at`; leaving stamps `left_at` and the row
/// stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoomMember {
    pub user_id: Uuid,

    pub chat_room_id: Uuid,

    pub joined_at: DateTime<Utc>,

    /// `None` while the membership is active
    pub left_at: Option<DateTime<Utc>>,
}

impl ChatRoomMember {
    pub fn new(user_id: Uuid, chat_room_id: Uuid) -> Self {
        Self {
            user_id,
            chat_room_id,
            joined_at: Utc::now(),
            left_at: None,
        }
    }

    /// Composite primary key.
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.user_id, self.chat_room_id)
    }
}

impl Auditable for ChatRoomMember {
    fn on_created(&mut self, now: DateTime<Utc>) {
        self.joined_at = now;
    }

    // No updated_at column to move.
    fn on_modified(&mut self, _now: DateTime<Utc>) {}

    fn on_deleted(&mut self, now: DateTime<Utc>) {
        self.left_at = Some(now);
    }

    fn is_live(&self) -> bool {
        self.left_at.is_none()
    }
}

/// Repository trait for ChatRoomMember reads. Only active memberships are
/// returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRoomMemberRepository: Send + Sync {
    /// Find the active membership of a user in a room.
    async fn find(
        &self,
        user_id: Uuid,
        chat_room_id: Uuid,
    ) -> Result<Option<ChatRoomMember>, AppError>;

    /// List active members of a room, earliest joiner first.
    async fn find_by_chat_room(&self, chat_room_id: Uuid)
        -> Result<Vec<ChatRoomMember>, AppError>;
}
