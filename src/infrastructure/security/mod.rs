//! Security collaborators: password hashing and access tokens.

mod jwt;
mod password;

pub use jwt::JwtService;
pub use password::Argon2PasswordHasher;
