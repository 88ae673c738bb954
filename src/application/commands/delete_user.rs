use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::mediator::{Request, RequestHandler};
use crate::domain::{AuthorizationGuard, ClaimSet, IdentityResolver, UserRepository};
use crate::infrastructure::database::{CommitSink, UnitOfWork};
use crate::shared::error::AppError;

/// Soft-delete the caller's own account.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: Uuid,
    pub claims: ClaimSet,
}

impl Request for DeleteUserCommand {
    type Response = ();
    const NAME: &'static str = "delete_user";
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    commit_sink: Arc<dyn CommitSink>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, commit_sink: Arc<dyn CommitSink>) -> Self {
        Self { users, commit_sink }
    }
}

#[async_trait]
impl RequestHandler<DeleteUserCommand> for DeleteUserHandler {
    async fn handle(&self, command: DeleteUserCommand) -> Result<(), AppError> {
        let principal = IdentityResolver::resolve(&command.claims)?;
        AuthorizationGuard::assert_ownership(&principal, command.user_id)?;

        let user = self
            .users
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with ID '{}' not found.", command.user_id))
            })?;

        let mut uow = UnitOfWork::new(self.commit_sink.clone());
        uow.remove(user);
        uow.commit().await?;

        tracing::info!(user_id = %command.user_id, "User soft-deleted");
        Ok(())
    }
}
