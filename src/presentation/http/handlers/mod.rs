//! HTTP Handlers
//!
//! Thin adapters: extract, build the command or query, send it through the
//! mediator, shape the response.

pub mod chat_room;
pub mod health;
pub mod user;
