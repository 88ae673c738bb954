//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::RegisterChatRoomRequest;
pub use response::{AuthResponse, ChatRoomResponse, UserResponse};
