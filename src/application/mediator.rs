//! Request dispatch.
//!
//! Every command and query is a [`Request`] with exactly one
//! [`RequestHandler`]. The [`Mediator`] owns one instance of each handler,
//! routes a request to it and records the outcome.

use std::sync::Arc;

use async_trait::async_trait;

use super::commands::{
    DeleteUserCommand, DeleteUserHandler, LoginUserCommand, LoginUserHandler,
    RegisterChatRoomCommand, RegisterChatRoomHandler, RegisterUserCommand, RegisterUserHandler,
};
use super::queries::{GetUserHandler, GetUserQuery};
use crate::domain::{PasswordHasher, TokenIssuer, UserRepository};
use crate::infrastructure::database::CommitSink;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// A typed command or query.
pub trait Request: Send + 'static {
    type Response: Send;

    /// Stable name used in logs and metrics.
    const NAME: &'static str;
}

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Response, AppError>;
}

/// Collaborators shared by the handlers.
#[derive(Clone)]
pub struct Dependencies {
    pub users: Arc<dyn UserRepository>,
    pub commit_sink: Arc<dyn CommitSink>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

/// Routes requests to their handlers.
pub struct Mediator {
    register_user: RegisterUserHandler,
    login_user: LoginUserHandler,
    delete_user: DeleteUserHandler,
    register_chat_room: RegisterChatRoomHandler,
    get_user: GetUserHandler,
}

impl Mediator {
    pub fn new(deps: Dependencies) -> Self {
        Self {
            register_user: RegisterUserHandler::new(
                deps.users.clone(),
                deps.commit_sink.clone(),
                deps.password_hasher.clone(),
            ),
            login_user: LoginUserHandler::new(
                deps.users.clone(),
                deps.password_hasher,
                deps.token_issuer,
            ),
            delete_user: DeleteUserHandler::new(deps.users.clone(), deps.commit_sink.clone()),
            register_chat_room: RegisterChatRoomHandler::new(
                deps.users.clone(),
                deps.commit_sink,
            ),
            get_user: GetUserHandler::new(deps.users),
        }
    }

    /// Dispatch a request to its handler.
    pub async fn send<R>(&self, request: R) -> Result<R::Response, AppError>
    where
        R: Request,
        Self: RequestHandler<R>,
    {
        tracing::debug!(request = R::NAME, "Dispatching");
        let result = RequestHandler::<R>::handle(self, request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_command(R::NAME, outcome);

        result
    }
}

macro_rules! route {
    ($request:ty => $field:ident) => {
        #[async_trait]
        impl RequestHandler<$request> for Mediator {
            async fn handle(
                &self,
                request: $request,
            ) -> Result<<$request as Request>::Response, AppError> {
                self.$field.handle(request).await
            }
        }
    };
}

route!(RegisterUserCommand => register_user);
route!(LoginUserCommand => login_user);
route!(DeleteUserCommand => delete_user);
route!(RegisterChatRoomCommand => register_chat_room);
route!(GetUserQuery => get_user);
