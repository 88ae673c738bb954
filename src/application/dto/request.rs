//! Request DTOs
//!
//! Bodies that need the caller's identity before they become commands.
//! Register and login bodies deserialize straight into their commands.

use serde::Deserialize;

use crate::application::commands::RegisterChatRoomCommand;
use crate::domain::ClaimSet;

/// Create chat room request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterChatRoomRequest {
    pub name: String,
}

impl RegisterChatRoomRequest {
    pub fn into_command(self, claims: ClaimSet) -> RegisterChatRoomCommand {
        RegisterChatRoomCommand {
            name: self.name,
            claims,
        }
    }
}
