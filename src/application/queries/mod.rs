//! Queries
//!
//! Read-only requests. They never open a unit of work.

mod get_user;

pub use get_user::{GetUserHandler, GetUserQuery};
