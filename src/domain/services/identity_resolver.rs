//! Identity resolution domain service.

use uuid::Uuid;

use crate::domain::value_objects::{
    ClaimSet, Principal, EMAIL_CLAIM, LEGACY_SUBJECT_CLAIM, NICKNAME_CLAIM, SUBJECT_CLAIM,
};
use crate::shared::error::AppError;

/// Turns verified token claims into a [`Principal`].
pub struct IdentityResolver;

impl IdentityResolver {
    /// Resolve the caller from a claim set.
    ///
    /// The subject is read from `sub`, falling back to the legacy
    /// name-identifier claim. A missing, empty or non-UUID subject is
    /// `Unauthorized`.
    pub fn resolve(claims: &ClaimSet) -> Result<Principal, AppError> {
        let subject = claims
            .get_str(SUBJECT_CLAIM)
            .or_else(|| claims.get_str(LEGACY_SUBJECT_CLAIM))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("User identity is missing from token".into())
            })?;

        let user_id = Uuid::parse_str(subject).map_err(|_| {
            AppError::Unauthorized("User identity is invalid (malformed subject claim)".into())
        })?;

        Ok(Principal {
            user_id,
            email: claims.get_str(EMAIL_CLAIM).map(str::to_owned),
            nickname: claims.get_str(NICKNAME_CLAIM).map(str::to_owned),
        })
    }
}
