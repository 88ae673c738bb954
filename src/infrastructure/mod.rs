//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database unit of work and repositories (PostgreSQL)
//! - In-memory storage backend
//! - Password hashing and JWT tokens
//! - Prometheus metrics

pub mod database;
pub mod memory;
pub mod metrics;
pub mod repositories;
pub mod security;
