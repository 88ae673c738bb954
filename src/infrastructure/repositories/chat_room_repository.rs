//! Chat Room Repository Implementation
//!
//! PostgreSQL implementation of the ChatRoomRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::map_write_error;
use crate::domain::{AuditTimestamps, ChatRoom, ChatRoomRepository};
use crate::shared::error::AppError;

/// Database row representation matching the chat_rooms table schema.
#[derive(Debug, sqlx::FromRow)]
struct ChatRoomRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ChatRoomRow> for ChatRoom {
    fn from(row: ChatRoomRow) -> Self {
        ChatRoom {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            audit: AuditTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
        }
    }
}

/// PostgreSQL chat room repository implementation.
#[derive(Clone)]
pub struct PgChatRoomRepository {
    pool: PgPool,
}

impl PgChatRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRoomRepository for PgChatRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatRoom>, AppError> {
        let row = sqlx::query_as::<_, ChatRoomRow>(
            r#"
            SELECT id, owner_id, name, created_at, updated_at, deleted_at
            FROM chat_rooms
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChatRoom::from))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<ChatRoom>, AppError> {
        let rows = sqlx::query_as::<_, ChatRoomRow>(
            r#"
            SELECT id, owner_id, name, created_at, updated_at, deleted_at
            FROM chat_rooms
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatRoom::from).collect())
    }
}

pub(crate) async fn insert(conn: &mut PgConnection, room: &ChatRoom) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO chat_rooms (id, owner_id, name, created_at, updated_at, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(room.id)
    .bind(room.owner_id)
    .bind(&room.name)
    .bind(room.audit.created_at)
    .bind(room.audit.updated_at)
    .bind(room.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

pub(crate) async fn update(conn: &mut PgConnection, room: &ChatRoom) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE chat_rooms
        SET name = $2,
            updated_at = $3,
            deleted_at = $4
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(room.id)
    .bind(&room.name)
    .bind(room.audit.updated_at)
    .bind(room.audit.deleted_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Chat room with ID '{}' not found.", room.id)));
    }

    Ok(())
}
