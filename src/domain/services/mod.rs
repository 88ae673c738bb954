//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity, plus the contracts of the security collaborators the
//! handlers depend on.
//!
//! ## Services
//!
//! - **IdentityResolver**: claim set to typed principal
//! - **AuthorizationGuard**: ownership checks for self-scoped mutations
//! - **PasswordHasher**: password hashing contract
//! - **TokenIssuer**: access token issuing contract

mod authorization;
mod identity_resolver;
mod password;
mod token;

pub use authorization::*;
pub use identity_resolver::*;
pub use password::*;
pub use token::*;
