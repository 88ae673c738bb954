//! User Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::commands::{DeleteUserCommand, LoginUserCommand, RegisterUserCommand};
use crate::application::dto::{AuthResponse, UserResponse};
use crate::application::queries::GetUserQuery;
use crate::domain::ClaimSet;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new user
pub async fn register_user(
    State(state): State<AppState>,
    Json(command): Json<RegisterUserCommand>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.mediator.send(command).await?;
    Ok(Json(user))
}

/// Login with credentials
pub async fn login_user(
    State(state): State<AppState>,
    Json(command): Json<LoginUserCommand>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth = state.mediator.send(command).await?;
    Ok(Json(auth))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.mediator.send(GetUserQuery { user_id }).await?;
    Ok(Json(user))
}

/// Delete the caller's own account
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mediator
        .send(DeleteUserCommand { user_id, claims })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
