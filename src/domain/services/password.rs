//! Password hashing contract.

use crate::shared::error::AppError;

/// One-way password hashing.
///
/// Implemented in the infrastructure layer; the algorithm is an
/// implementation detail.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Check a plain-text password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}
