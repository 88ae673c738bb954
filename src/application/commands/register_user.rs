use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

use super::hash_password;
use crate::application::dto::UserResponse;
use crate::application::mediator::{Request, RequestHandler};
use crate::domain::{PasswordHasher, User, UserRepository};
use crate::infrastructure::database::{CommitSink, UnitOfWork};
use crate::shared::error::AppError;
use crate::shared::validation::validate;

/// Create a new account.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserCommand {
    #[validate(length(min = 3, max = 20, message = "Nickname must be 3-20 characters"))]
    pub nick_name: String,

    #[validate(length(min = 3, max = 50, message = "First name must be 3-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 3, max = 50, message = "Last name must be 3-50 characters"))]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(custom(function = "crate::shared::validation::validate_password_complexity"))]
    pub password: String,
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("nick_name", &self.nick_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Request for RegisterUserCommand {
    type Response = UserResponse;
    const NAME: &'static str = "register_user";
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    commit_sink: Arc<dyn CommitSink>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        commit_sink: Arc<dyn CommitSink>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            commit_sink,
            password_hasher,
        }
    }
}

#[async_trait]
impl RequestHandler<RegisterUserCommand> for RegisterUserHandler {
    async fn handle(&self, command: RegisterUserCommand) -> Result<UserResponse, AppError> {
        validate(&command)?;

        // Early answer only; the live-email constraint decides races.
        if self.users.email_exists(&command.email).await? {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(self.password_hasher.clone(), command.password).await?;
        let user = User::new(
            command.nick_name,
            command.first_name,
            command.last_name,
            command.email,
            password_hash,
        );
        let response = UserResponse::from(&user);

        let mut uow = UnitOfWork::new(self.commit_sink.clone());
        uow.add(user);
        uow.commit().await?;

        tracing::info!(user_id = %response.id, "User registered");
        Ok(response)
    }
}
