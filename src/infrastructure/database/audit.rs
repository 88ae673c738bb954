//! Commit-time audit interceptor.
//!
//! Runs once over the pending write-set of a unit of work, right before it is
//! handed to storage:
//!
//! | pending state | stamped by                 | reaches storage as |
//! |---------------|----------------------------|--------------------|
//! | `Added`       | `Auditable::on_created`    | insert             |
//! | `Modified`    | `Auditable::on_modified`   | update             |
//! | `Deleted`     | `Auditable::on_deleted`    | update (tombstone) |
//!
//! Storage never receives a `Deleted` entry.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Auditable, ChatRoom, ChatRoomMember, Message, User};

/// Pending state of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

/// Any entity the unit of work can persist.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedEntity {
    User(User),
    ChatRoom(ChatRoom),
    ChatRoomMember(ChatRoomMember),
    Message(Message),
}

impl TrackedEntity {
    /// Table name, used for logs and metrics.
    pub fn table(&self) -> &'static str {
        match self {
            TrackedEntity::User(_) => "users",
            TrackedEntity::ChatRoom(_) => "chat_rooms",
            TrackedEntity::ChatRoomMember(_) => "chat_room_members",
            TrackedEntity::Message(_) => "messages",
        }
    }

    fn auditable_mut(&mut self) -> &mut dyn Auditable {
        match self {
            TrackedEntity::User(e) => e,
            TrackedEntity::ChatRoom(e) => e,
            TrackedEntity::ChatRoomMember(e) => e,
            TrackedEntity::Message(e) => e,
        }
    }
}

impl From<User> for TrackedEntity {
    fn from(entity: User) -> Self {
        TrackedEntity::User(entity)
    }
}

impl From<ChatRoom> for TrackedEntity {
    fn from(entity: ChatRoom) -> Self {
        TrackedEntity::ChatRoom(entity)
    }
}

impl From<ChatRoomMember> for TrackedEntity {
    fn from(entity: ChatRoomMember) -> Self {
        TrackedEntity::ChatRoomMember(entity)
    }
}

impl From<Message> for TrackedEntity {
    fn from(entity: Message) -> Self {
        TrackedEntity::Message(entity)
    }
}

/// One entry of the pending write-set.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEntry {
    pub state: EntityState,
    pub entity: TrackedEntity,
}

impl EntityEntry {
    pub fn new(state: EntityState, entity: impl Into<TrackedEntity>) -> Self {
        Self {
            state,
            entity: entity.into(),
        }
    }
}

/// Pre-commit hook that stamps lifecycle timestamps and rewrites deletions.
pub struct AuditInterceptor;

impl AuditInterceptor {
    /// Apply the audit transitions to every pending entry, in place.
    pub fn before_commit(entries: &mut [EntityEntry], now: DateTime<Utc>) {
        for entry in entries.iter_mut() {
            let entity = entry.entity.auditable_mut();
            match entry.state {
                EntityState::Added => entity.on_created(now),
                EntityState::Modified => entity.on_modified(now),
                EntityState::Deleted => {
                    entity.on_deleted(now);
                    entry.state = EntityState::Modified;
                }
            }
        }
    }
}
