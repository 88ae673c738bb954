//! Commands
//!
//! State-changing requests and their handlers. Each handler validates its
//! input, resolves and authorizes the caller where the command is
//! identity-scoped, and writes through a single unit of work.

mod delete_user;
mod login_user;
mod register_chat_room;
mod register_user;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use login_user::{LoginUserCommand, LoginUserHandler};
pub use register_chat_room::{RegisterChatRoomCommand, RegisterChatRoomHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};

use std::sync::Arc;

use crate::domain::PasswordHasher;
use crate::shared::error::AppError;

// Argon2 is CPU bound; keep it off the async workers.
async fn hash_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    hash: String,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}
