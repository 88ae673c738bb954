//! # Domain Entities
//!
//! Core domain entities representing the business objects of the chat
//! manager. All entities map directly to their corresponding database tables.
//!
//! - **User**: account with credentials and profile
//! - **ChatRoom**: a room owned by a user
//! - **ChatRoomMember**: a user's membership in a room
//! - **Message**: a message posted to a room
//!
//! ## Lifecycle
//!
//! Rows are never physically removed. Every entity implements [`Auditable`];
//! the unit of work calls it at commit time to stamp timestamps and to turn
//! deletions into tombstone updates.
//!
//! ## Repository Traits
//!
//! Each queried entity has a read-only repository trait. Implementations
//! live in the infrastructure layer.

mod audit;
mod chat_room;
mod chat_room_member;
mod message;
mod user;

pub use audit::{AuditTimestamps, Auditable};

pub use user::{User, UserRepository};

pub use chat_room::{ChatRoom, ChatRoomRepository};

pub use chat_room_member::{ChatRoomMember, ChatRoomMemberRepository};

pub use message::{Message, MAX_MESSAGE_LENGTH};

#[cfg(test)]
pub use chat_room::MockChatRoomRepository;
#[cfg(test)]
pub use chat_room_member::MockChatRoomMemberRepository;
#[cfg(test)]
pub use user::MockUserRepository;
