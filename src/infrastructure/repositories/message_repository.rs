//! Message row writers.
//!
//! Messages have no read repository yet; the commit sink still needs to
//! insert and tombstone them.

use sqlx::PgConnection;

use super::map_write_error;
use crate::domain::Message;
use crate::shared::error::AppError;

pub(crate) async fn insert(conn: &mut PgConnection, message: &Message) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO messages (id, chat_room_id, sender_id, content, created_at, updated_at, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(message.id)
    .bind(message.chat_room_id)
    .bind(message.sender_id)
    .bind(&message.content)
    .bind(message.audit.created_at)
    .bind(message.audit.updated_at)
    .bind(message.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

pub(crate) async fn update(conn: &mut PgConnection, message: &Message) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE messages
        SET content = $2,
            updated_at = $3,
            deleted_at = $4
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(message.id)
    .bind(&message.content)
    .bind(message.audit.updated_at)
    .bind(message.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Message with ID '{}' not found.", message.id)));
    }

    Ok(())
}
