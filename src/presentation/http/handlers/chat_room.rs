//! Chat Room Handlers

use axum::{
    extract::{Extension, State},
    Json,
};

use crate::application::dto::{ChatRoomResponse, RegisterChatRoomRequest};
use crate::domain::ClaimSet;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a chat room owned by the caller
pub async fn register_chat_room(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
    Json(body): Json<RegisterChatRoomRequest>,
) -> Result<Json<ChatRoomResponse>, AppError> {
    let room = state.mediator.send(body.into_command(claims)).await?;
    Ok(Json(room))
}
