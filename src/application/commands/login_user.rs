use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::verify_password;
use crate::application::dto::AuthResponse;
use crate::application::mediator::{Request, RequestHandler};
use crate::domain::{PasswordHasher, TokenIssuer, UserRepository};
use crate::shared::error::AppError;

/// Same error for an unknown email and a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Exchange credentials for an access token.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUserCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Request for LoginUserCommand {
    type Response = AuthResponse;
    const NAME: &'static str = "login_user";
}

pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            token_issuer,
        }
    }
}

#[async_trait]
impl RequestHandler<LoginUserCommand> for LoginUserHandler {
    async fn handle(&self, command: LoginUserCommand) -> Result<AuthResponse, AppError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| AppError::NotFound(INVALID_CREDENTIALS.into()))?;

        let verified = verify_password(
            self.password_hasher.clone(),
            command.password,
            user.password_hash.clone(),
        )
        .await?;
        if !verified {
            tracing::debug!(user_id = %user.id, "Password rejected");
            return Err(AppError::NotFound(INVALID_CREDENTIALS.into()));
        }

        let token = self.token_issuer.issue(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthResponse {
            id: user.id,
            nick_name: user.nick_name,
            email: user.email,
            token,
        })
    }
}
