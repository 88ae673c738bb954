//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! Each module provides the read-side repository for one entity and the
//! `insert` / `update` row writers that [`PgCommitSink`] calls inside its
//! transaction. Reads only ever return live rows.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgChatRoomRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let chat_room_repo = PgChatRoomRepository::new(pool.clone());
//! }
//! ```
//!
//! [`PgCommitSink`]: crate::infrastructure::database::PgCommitSink

pub mod chat_room_member_repository;
pub mod chat_room_repository;
pub mod message_repository;
pub mod user_repository;

pub use chat_room_member_repository::PgChatRoomMemberRepository;
pub use chat_room_repository::PgChatRoomRepository;
pub use user_repository::PgUserRepository;

use crate::shared::error::AppError;

/// Partial unique index on `lower(email)` for live users.
pub const USERS_LIVE_EMAIL_INDEX: &str = "users_email_live_key";

/// Composite primary key of memberships.
pub const CHAT_ROOM_MEMBERS_PKEY: &str = "chat_room_members_pkey";

/// Translate constraint violations on writes into domain errors.
///
/// The storage constraint is the authoritative uniqueness check; handler
/// pre-checks only give a friendlier early answer.
pub(crate) fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some(USERS_LIVE_EMAIL_INDEX) => "Email already exists",
                Some(CHAT_ROOM_MEMBERS_PKEY) => "User is already a member of this chat room",
                _ => "Resource already exists",
            };
            return AppError::Conflict(message.into());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("Referenced resource not found".into());
        }
    }
    AppError::Database(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, thiserror::Error)]
    #[error("{kind:?} on {constraint:?}")]
    struct ConstraintError {
        kind: ErrorKind,
        constraint: Option<&'static str>,
    }

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn violation(kind: ErrorKind, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { kind, constraint }))
    }

    #[test]
    fn test_live_email_index_maps_to_email_conflict() {
        let error = map_write_error(violation(
            ErrorKind::UniqueViolation,
            Some(USERS_LIVE_EMAIL_INDEX),
        ));
        assert!(matches!(error, AppError::Conflict(ref m) if m == "Email already exists"));
    }

    #[test]
    fn test_membership_pkey_maps_to_membership_conflict() {
        let error = map_write_error(violation(
            ErrorKind::UniqueViolation,
            Some(CHAT_ROOM_MEMBERS_PKEY),
        ));
        assert!(matches!(
            error,
            AppError::Conflict(ref m) if m == "User is already a member of this chat room"
        ));
    }

    #[test]
    fn test_other_unique_constraint_maps_to_generic_conflict() {
        let error = map_write_error(violation(ErrorKind::UniqueViolation, Some("users_pkey")));
        assert!(matches!(error, AppError::Conflict(ref m) if m == "Resource already exists"));
    }

    #[test]
    fn test_foreign_key_violation_maps_to_not_found() {
        let error = map_write_error(violation(
            ErrorKind::ForeignKeyViolation,
            Some("chat_rooms_owner_id_fkey"),
        ));
        assert!(matches!(error, AppError::NotFound(ref m) if m == "Referenced resource not found"));
    }

    #[test]
    fn test_other_database_errors_stay_database_errors() {
        let error = map_write_error(violation(ErrorKind::CheckViolation, None));
        assert!(matches!(error, AppError::Database(_)));
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        assert!(matches!(
            map_write_error(sqlx::Error::RowNotFound),
            AppError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
