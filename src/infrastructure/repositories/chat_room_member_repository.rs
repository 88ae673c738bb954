//! Chat Room Member Repository Implementation
//!
//! PostgreSQL implementation of the ChatRoomMemberRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::map_write_error;
use crate::domain::{ChatRoomMember, ChatRoomMemberRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    user_id: Uuid,
    chat_room_id: Uuid,
    joined_at: DateTime<Utc>,
    left_at: Option<DateTime<Utc>>,
}

impl From<MemberRow> for ChatRoomMember {
    fn from(row: MemberRow) -> Self {
        ChatRoomMember {
            user_id: row.user_id,
            chat_room_id: row.chat_room_id,
            joined_at: row.joined_at,
            left_at: row.left_at,
        }
    }
}

/// PostgreSQL membership repository implementation.
#[derive(Clone)]
pub struct PgChatRoomMemberRepository {
    pool: PgPool,
}

impl PgChatRoomMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRoomMemberRepository for PgChatRoomMemberRepository {
    async fn find(
        &self,
        user_id: Uuid,
        chat_room_id: Uuid,
    ) -> Result<Option<ChatRoomMember>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, chat_room_id, joined_at, left_at
            FROM chat_room_members
            WHERE user_id = $1 AND chat_room_id = $2 AND left_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(chat_room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChatRoomMember::from))
    }

    async fn find_by_chat_room(
        &self,
        chat_room_id: Uuid,
    ) -> Result<Vec<ChatRoomMember>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, chat_room_id, joined_at, left_at
            FROM chat_room_members
            WHERE chat_room_id = $1 AND left_at IS NULL
            ORDER BY joined_at ASC
            "#,
        )
        .bind(chat_room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatRoomMember::from).collect())
    }
}

pub(crate) async fn insert(conn: &mut PgConnection, member: &ChatRoomMember) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO chat_room_members (user_id, chat_room_id, joined_at, left_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(member.user_id)
    .bind(member.chat_room_id)
    .bind(member.joined_at)
    .bind(member.left_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

/// Only `left_at` is mutable on a membership.
pub(crate) async fn update(conn: &mut PgConnection, member: &ChatRoomMember) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE chat_room_members
        SET left_at = $3
        WHERE user_id = $1 AND chat_room_id = $2 AND left_at IS NULL
        "#,
    )
    .bind(member.user_id)
    .bind(member.chat_room_id)
    .bind(member.left_at)
    .execute(conn)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Membership of user {} in chat room {} not found",
            member.user_id, member.chat_room_id
        )));
    }

    Ok(())
}
