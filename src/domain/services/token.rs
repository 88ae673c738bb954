//! Access token issuing contract.

use crate::domain::entities::User;
use crate::shared::error::AppError;

/// Issues signed access tokens for authenticated users.
///
/// Tokens embed the subject id, email and nickname.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, AppError>;
}
