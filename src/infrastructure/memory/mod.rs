//! In-Memory Storage Backend
//!
//! A process-local store used for development and tests. It implements the
//! same read repositories and commit sink as PostgreSQL and enforces the
//! same constraints:
//!
//! - live user emails are unique, ignoring case
//! - a membership's `(user_id, chat_room_id)` key is unique across all rows
//! - referenced users and chat rooms must exist
//! - updates only apply to live rows
//!
//! A commit is staged against a copy of the tables and swapped in only if
//! every entry applies, so a rejected write-set leaves no trace.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{
    Auditable, ChatRoom, ChatRoomMember, ChatRoomMemberRepository, ChatRoomRepository, Message,
    User, UserRepository,
};
use crate::infrastructure::database::{CommitSink, EntityEntry, EntityState, TrackedEntity};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    chat_rooms: HashMap<Uuid, ChatRoom>,
    members: HashMap<(Uuid, Uuid), ChatRoomMember>,
    messages: HashMap<Uuid, Message>,
}

impl Tables {
    fn live_email_taken(&self, email: &str, except: Uuid) -> bool {
        self.users
            .values()
            .any(|u| u.id != except && u.is_live() && u.has_email(email))
    }

    fn require_user(&self, id: Uuid) -> Result<(), AppError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::NotFound("Referenced resource not found".into()))
        }
    }

    fn require_chat_room(&self, id: Uuid) -> Result<(), AppError> {
        if self.chat_rooms.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::NotFound("Referenced resource not found".into()))
        }
    }

    fn apply(&mut self, entry: &EntityEntry) -> Result<(), AppError> {
        match (entry.state, &entry.entity) {
            (EntityState::Added, TrackedEntity::User(user)) => self.insert_user(user),
            (EntityState::Modified, TrackedEntity::User(user)) => self.update_user(user),
            (EntityState::Added, TrackedEntity::ChatRoom(room)) => self.insert_chat_room(room),
            (EntityState::Modified, TrackedEntity::ChatRoom(room)) => self.update_chat_room(room),
            (EntityState::Added, TrackedEntity::ChatRoomMember(member)) => {
                self.insert_member(member)
            }
            (EntityState::Modified, TrackedEntity::ChatRoomMember(member)) => {
                self.update_member(member)
            }
            (EntityState::Added, TrackedEntity::Message(message)) => self.insert_message(message),
            (EntityState::Modified, TrackedEntity::Message(message)) => {
                self.update_message(message)
            }
            (EntityState::Deleted, entity) => Err(AppError::Internal(format!(
                "unaudited delete reached storage for {}",
                entity.table()
            ))),
        }
    }

    fn insert_user(&mut self, user: &User) -> Result<(), AppError> {
        if self.users.contains_key(&user.id) {
            return Err(AppError::Conflict("Resource already exists".into()));
        }
        if user.is_live() && self.live_email_taken(&user.email, user.id) {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    fn update_user(&mut self, user: &User) -> Result<(), AppError> {
        match self.users.get(&user.id) {
            Some(current) if current.is_live() => {}
            _ => return Err(AppError::NotFound(format!("User with ID '{}' not found.", user.id))),
        }
        if user.is_live() && self.live_email_taken(&user.email, user.id) {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    fn insert_chat_room(&mut self, room: &ChatRoom) -> Result<(), AppError> {
        if self.chat_rooms.contains_key(&room.id) {
            return Err(AppError::Conflict("Resource already exists".into()));
        }
        self.require_user(room.owner_id)?;
        self.chat_rooms.insert(room.id, room.clone());
        Ok(())
    }

    fn update_chat_room(&mut self, room: &ChatRoom) -> Result<(), AppError> {
        match self.chat_rooms.get_mut(&room.id) {
            Some(current) if current.is_live() => {
                *current = room.clone();
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("Chat room with ID '{}' not found.", room.id))),
        }
    }

    fn insert_member(&mut self, member: &ChatRoomMember) -> Result<(), AppError> {
        if self.members.contains_key(&member.key()) {
            return Err(AppError::Conflict(
                "User is already a member of this chat room".into(),
            ));
        }
        self.require_user(member.user_id)?;
        self.require_chat_room(member.chat_room_id)?;
        self.members.insert(member.key(), member.clone());
        Ok(())
    }

    fn update_member(&mut self, member: &ChatRoomMember) -> Result<(), AppError> {
        match self.members.get_mut(&member.key()) {
            Some(current) if current.is_live() => {
                current.left_at = member.left_at;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "Membership of user {} in chat room {} not found",
                member.user_id, member.chat_room_id
            ))),
        }
    }

    fn insert_message(&mut self, message: &Message) -> Result<(), AppError> {
        if self.messages.contains_key(&message.id) {
            return Err(AppError::Conflict("Resource already exists".into()));
        }
        self.require_chat_room(message.chat_room_id)?;
        self.require_user(message.sender_id)?;
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    fn update_message(&mut self, message: &Message) -> Result<(), AppError> {
        match self.messages.get_mut(&message.id) {
            Some(current) if current.is_live() => {
                *current = message.clone();
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "Message with ID '{}' not found.",
                message.id
            ))),
        }
    }
}

/// Process-local storage shared by all requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a user row whether or not it has been tombstoned.
    pub fn user_including_deleted(&self, id: Uuid) -> Option<User> {
        self.tables.read().users.get(&id).cloned()
    }

    /// Fetch a membership row whether or not it has ended.
    pub fn member_including_left(&self, user_id: Uuid, chat_room_id: Uuid) -> Option<ChatRoomMember> {
        self.tables
            .read()
            .members
            .get(&(user_id, chat_room_id))
            .cloned()
    }

    /// Number of user rows, live or not.
    pub fn user_row_count(&self) -> usize {
        self.tables.read().users.len()
    }

    /// Number of chat room rows, live or not.
    pub fn chat_room_row_count(&self) -> usize {
        self.tables.read().chat_rooms.len()
    }

    fn commit_entries(&self, entries: &[EntityEntry]) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        let mut staged = tables.clone();
        for entry in entries {
            staged.apply(entry)?;
        }
        *tables = staged;
        Ok(())
    }
}

#[async_trait]
impl CommitSink for MemoryStore {
    async fn persist(&self, entries: &[EntityEntry]) -> Result<(), AppError> {
        self.commit_entries(entries)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .read()
            .users
            .get(&id)
            .filter(|u| u.is_live())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.is_live() && u.has_email(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .any(|u| u.is_live() && u.has_email(email)))
    }
}

#[async_trait]
impl ChatRoomRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatRoom>, AppError> {
        Ok(self
            .tables
            .read()
            .chat_rooms
            .get(&id)
            .filter(|r| r.is_live())
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChatRoom>, AppError> {
        let mut rooms: Vec<ChatRoom> = self
            .tables
            .read()
            .chat_rooms
            .values()
            .filter(|r| r.is_live() && r.is_owned_by(owner_id))
            .cloned()
            .collect();
        rooms.sort_by_key(|r| r.audit.created_at);
        Ok(rooms)
    }
}

#[async_trait]
impl ChatRoomMemberRepository for MemoryStore {
    async fn find(
        &self,
        user_id: Uuid,
        chat_room_id: Uuid,
    ) -> Result<Option<ChatRoomMember>, AppError> {
        Ok(self
            .tables
            .read()
            .members
            .get(&(user_id, chat_room_id))
            .filter(|m| m.is_live())
            .cloned())
    }

    async fn find_by_chat_room(
        &self,
        chat_room_id: Uuid,
    ) -> Result<Vec<ChatRoomMember>, AppError> {
        let mut members: Vec<ChatRoomMember> = self
            .tables
            .read()
            .members
            .values()
            .filter(|m| m.chat_room_id == chat_room_id && m.is_live())
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::database::UnitOfWork;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    async fn seed_user(store: &Arc<MemoryStore>, email: &str) -> User {
        let user = User::new("abc", "Ann", "Lee", email, "hash");
        let mut uow = UnitOfWork::new(store.clone());
        uow.add(user.clone());
        uow.commit().await.unwrap();
        UserRepository::find_by_id(store.as_ref(), user.id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_added_user_is_stamped_and_readable() {
        let store = store();
        let user = seed_user(&store, "a@x.com").await;

        assert!(user.audit.deleted_at.is_none());
        assert_eq!(user.audit.created_at, user.audit.updated_at);
        assert!(store.email_exists("A@X.COM").await.unwrap());
        assert!(store.find_by_email("a@X.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_live_email_conflicts_case_insensitively() {
        let store = store();
        seed_user(&store, "a@x.com").await;

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(User::new("def", "Bob", "Ray", "A@x.COM", "hash"));
        let result = uow.commit().await;

        assert!(matches!(result, Err(AppError::Conflict(ref m)) if m == "Email already exists"));
        assert_eq!(store.user_row_count(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_email_conflicts_case_insensitively() {
        let store = store();
        seed_user(&store, "ann@BÜCHER.de").await;

        assert!(store.email_exists("ann@bücher.de").await.unwrap());

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(User::new("def", "Bob", "Ray", "ann@bücher.de", "hash"));
        let result = uow.commit().await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.user_row_count(), 1);
    }

    #[tokio::test]
    async fn test_email_is_reusable_after_soft_delete() {
        let store = store();
        let user = seed_user(&store, "a@x.com").await;

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(user.clone());
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(User::new("def", "Bob", "Ray", "a@x.com", "hash"));
        uow.commit().await.unwrap();

        assert_eq!(store.user_row_count(), 2);
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row_and_hides_it_from_reads() {
        let store = store();
        let user = seed_user(&store, "a@x.com").await;

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(user.clone());
        uow.commit().await.unwrap();

        assert!(UserRepository::find_by_id(store.as_ref(), user.id)
            .await
            .unwrap()
            .is_none());
        assert!(!store.email_exists("a@x.com").await.unwrap());

        let tombstone = store.user_including_deleted(user.id).unwrap();
        assert!(tombstone.audit.deleted_at.is_some());
        assert_eq!(tombstone.audit.created_at, user.audit.created_at);
    }

    #[tokio::test]
    async fn test_second_soft_delete_is_not_found() {
        let store = store();
        let user = seed_user(&store, "a@x.com").await;

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(user.clone());
        uow.commit().await.unwrap();
        let first = store.user_including_deleted(user.id).unwrap();

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(user.clone());
        let result = uow.commit().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let after = store.user_including_deleted(user.id).unwrap();
        assert_eq!(after.audit.deleted_at, first.audit.deleted_at);
    }

    #[tokio::test]
    async fn test_rejected_write_set_leaves_no_partial_state() {
        let store = store();
        let owner = seed_user(&store, "a@x.com").await;
        let room = ChatRoom::new(owner.id, "Book Club");

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(room.clone());
        uow.add(ChatRoomMember::new(owner.id, room.id));
        // Conflicts with the seeded user, after the room insert applied.
        uow.add(User::new("def", "Bob", "Ray", "a@x.com", "hash"));
        assert!(uow.commit().await.is_err());

        assert_eq!(store.chat_room_row_count(), 0);
        assert!(store.member_including_left(owner.id, room.id).is_none());
    }

    #[tokio::test]
    async fn test_room_and_owner_membership_commit_together() {
        let store = store();
        let owner = seed_user(&store, "a@x.com").await;
        let room = ChatRoom::new(owner.id, "Book Club");

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(room.clone());
        uow.add(ChatRoomMember::new(owner.id, room.id));
        uow.commit().await.unwrap();

        let members = store.find_by_chat_room(room.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, owner.id);
        assert_eq!(store.find_by_owner(owner.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_membership_key_is_unique_even_after_leaving() {
        let store = store();
        let owner = seed_user(&store, "a@x.com").await;
        let room = ChatRoom::new(owner.id, "Book Club");
        let member = ChatRoomMember::new(owner.id, room.id);

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(room.clone());
        uow.add(member.clone());
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(member.clone());
        uow.commit().await.unwrap();
        assert!(store.find(owner.id, room.id).await.unwrap().is_none());
        assert!(store
            .member_including_left(owner.id, room.id)
            .unwrap()
            .left_at
            .is_some());

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(ChatRoomMember::new(owner.id, room.id));
        assert!(matches!(uow.commit().await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_chat_room_requires_existing_owner() {
        let store = store();

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(ChatRoom::new(Uuid::new_v4(), "Book Club"));

        assert!(matches!(uow.commit().await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_message_tombstone_hides_nothing_else() {
        let store = store();
        let owner = seed_user(&store, "a@x.com").await;
        let room = ChatRoom::new(owner.id, "Book Club");
        let message = Message::new(room.id, owner.id, "hello");

        let mut uow = UnitOfWork::new(store.clone());
        uow.add(room.clone());
        uow.add(message.clone());
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::new(store.clone());
        uow.remove(message);
        uow.commit().await.unwrap();

        assert!(ChatRoomRepository::find_by_id(store.as_ref(), room.id)
            .await
            .unwrap()
            .is_some());
    }
}
