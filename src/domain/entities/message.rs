//! Message entity.
//!
//! Maps to the `messages` table in the database schema. No command touches
//! messages yet; the entity takes part in unit-of-work auditing like any
//! other soft-deletable row.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::{soft_deletable, AuditTimestamps};

/// Maximum message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 6000;

/// Represents a message sent to a chat room.
///
/// Maps to the `messages` table:
/// - id: UUID PRIMARY KEY
/// - chat_room_id: UUID NOT NULL REFERENCES chat_rooms(id)
/// - sender_id: UUID NOT NULL REFERENCES users(id)
/// - content: VARCHAR(6000) NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL
/// - deleted_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,

    pub chat_room_id: Uuid,

    pub sender_id: Uuid,

    pub content: String,

    #[serde(flatten)]
    pub audit: AuditTimestamps,
}

soft_deletable!(Message);

impl Message {
    pub fn new(chat_room_id: Uuid, sender_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_room_id,
            sender_id,
            content: content.into(),
            audit: AuditTimestamps::default(),
        }
    }

    pub fn is_within_length_limit(&self) -> bool {
        self.content.chars().count() <= MAX_MESSAGE_LENGTH
    }
}
