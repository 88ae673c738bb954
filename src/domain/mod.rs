//! # Domain Layer
//!
//! The domain layer contains the core business rules of the chat manager.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, ChatRoom, ChatRoomMember, Message)
//! - **value_objects**: Immutable value types (ClaimSet, Principal)
//! - **services**: Identity resolution, authorization and security contracts
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities own their lifecycle stamping through `Auditable`

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
