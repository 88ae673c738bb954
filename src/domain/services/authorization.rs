//! Ownership authorization domain service.

use uuid::Uuid;

use crate::domain::value_objects::Principal;
use crate::shared::error::AppError;

/// Data-driven authorization: a caller may only act on resources it owns.
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Fail with `Forbidden` unless `principal` owns `target_owner_id`.
    ///
    /// Must run before any destructive repository call.
    pub fn assert_ownership(principal: &Principal, target_owner_id: Uuid) -> Result<(), AppError> {
        if principal.user_id == target_owner_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You can only modify resources you own".into(),
            ))
        }
    }
}
