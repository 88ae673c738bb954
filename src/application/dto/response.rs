//! Response DTOs
//!
//! Data structures for API response bodies. None of them carries a
//! password or its hash.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ChatRoom, User};

/// Public user projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub nick_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            nick_name: user.nick_name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub nick_name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&ChatRoom> for ChatRoomResponse {
    fn from(room: &ChatRoom) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
        }
    }
}
