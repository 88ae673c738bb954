use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::application::dto::ChatRoomResponse;
use crate::application::mediator::{Request, RequestHandler};
use crate::domain::{ChatRoom, ChatRoomMember, ClaimSet, IdentityResolver, UserRepository};
use crate::infrastructure::database::{CommitSink, UnitOfWork};
use crate::shared::error::AppError;
use crate::shared::validation::validate;

/// Create a chat room owned by the caller.
#[derive(Debug, Clone, Validate)]
pub struct RegisterChatRoomCommand {
    #[validate(length(min = 5, max = 50, message = "Name must be 5-50 characters"))]
    pub name: String,

    pub claims: ClaimSet,
}

impl Request for RegisterChatRoomCommand {
    type Response = ChatRoomResponse;
    const NAME: &'static str = "register_chat_room";
}

pub struct RegisterChatRoomHandler {
    users: Arc<dyn UserRepository>,
    commit_sink: Arc<dyn CommitSink>,
}

impl RegisterChatRoomHandler {
    pub fn new(users: Arc<dyn UserRepository>, commit_sink: Arc<dyn CommitSink>) -> Self {
        Self { users, commit_sink }
    }
}

#[async_trait]
impl RequestHandler<RegisterChatRoomCommand> for RegisterChatRoomHandler {
    async fn handle(&self, command: RegisterChatRoomCommand) -> Result<ChatRoomResponse, AppError> {
        let principal = IdentityResolver::resolve(&command.claims)?;
        validate(&command)?;

        let owner = self
            .users
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

        let room = ChatRoom::new(owner.id, command.name);
        let membership = ChatRoomMember::new(owner.id, room.id);
        let response = ChatRoomResponse::from(&room);

        // Room and owner membership land together or not at all.
        let mut uow = UnitOfWork::new(self.commit_sink.clone());
        uow.add(room);
        uow.add(membership);
        uow.commit().await?;

        tracing::info!(chat_room_id = %response.id, owner_id = %owner.id, "Chat room registered");
        Ok(response)
    }
}
