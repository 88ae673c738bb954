//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **ClaimSet**: decoded claims of a verified bearer token
//! - **Principal**: the authenticated caller resolved from a claim set

mod principal;

pub use principal::*;
