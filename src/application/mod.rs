//! Application Layer
//!
//! Commands, queries and their handlers, the mediator that dispatches them,
//! and the data transfer objects (DTOs) they exchange with the presentation
//! layer.

pub mod commands;
pub mod dto;
pub mod mediator;
pub mod queries;

pub use mediator::{Dependencies, Mediator, Request, RequestHandler};
