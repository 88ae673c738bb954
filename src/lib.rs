//! # Chat Manager Library
//!
//! Backend for a chat-room product: user registration, login and
//! self-deletion, and chat room creation.
//!
//! Every mutation goes through an identity-scoped command pipeline and an
//! audited unit of work that turns deletes into timestamped soft deletes.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, identity and authorization rules
//! - **Application Layer**: Commands, queries, handlers and the mediator
//! - **Infrastructure Layer**: Unit of work, PostgreSQL and in-memory storage, security, metrics
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_manager/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Commands, queries and DTOs
//! +-- infrastructure/ Storage, security and metrics implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Commands and queries
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
