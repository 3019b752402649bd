//! PostgreSQL implementation of MessageRepository.
//!
//! Expects a `messages` table:
//!
//! ```sql
//! CREATE TABLE messages (
//!     id         BIGSERIAL PRIMARY KEY,
//!     user_id    TEXT NOT NULL,
//!     author     TEXT NOT NULL,
//!     text       TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::board::{BoardError, BoardMessage, NewMessage};
use crate::domain::foundation::{MessageId, Timestamp, UserId};
use crate::ports::MessageRepository;

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// Creates a new PostgresMessageRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_message(row: sqlx::postgres::PgRow) -> Result<BoardMessage, BoardError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| BoardError::Infrastructure(e.to_string()))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| BoardError::Infrastructure(e.to_string()))?;
    let author: String = row
        .try_get("author")
        .map_err(|e| BoardError::Infrastructure(e.to_string()))?;
    let text: String = row
        .try_get("text")
        .map_err(|e| BoardError::Infrastructure(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| BoardError::Infrastructure(e.to_string()))?;

    let user_id = UserId::new(user_id)
        .map_err(|e| BoardError::Infrastructure(format!("invalid user_id in row: {}", e)))?;

    Ok(BoardMessage {
        id: MessageId::from_i64(id),
        user_id,
        author,
        text,
        created_at: Timestamp::from_datetime(created_at),
    })
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn insert(&self, message: NewMessage) -> Result<BoardMessage, BoardError> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (user_id, author, text)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, author, text, created_at
            "#,
        )
        .bind(message.user_id.as_str())
        .bind(&message.author)
        .bind(&message.text)
        .fetch_one(&self.pool)
        .await?;

        row_to_message(row)
    }

    async fn list_all(&self) -> Result<Vec<BoardMessage>, BoardError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, author, text, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_message).collect()
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<BoardMessage>, BoardError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, author, text, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_message).transpose()
    }

    async fn delete(&self, id: &MessageId, user_id: &UserId) -> Result<(), BoardError> {
        // Fetch first to distinguish not-found from not-owner.
        let owner: Option<String> = sqlx::query_scalar(
            r#"
            SELECT user_id FROM messages WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let owner = owner.ok_or(BoardError::NotFound)?;
        if owner != user_id.as_str() {
            return Err(BoardError::Forbidden);
        }

        sqlx::query(
            r#"
            DELETE FROM messages WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
