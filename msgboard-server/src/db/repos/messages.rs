//! Message repository
//!
//! Two statements over the pool: list newest-first, and insert-returning.
//! Column names are `texto`/`fecha` for compatibility with existing tables.

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::MessageText;

/// Message record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Message {
    pub id: i32,
    #[sqlx(rename = "texto")]
    pub text: String,
    #[sqlx(rename = "fecha")]
    pub timestamp: NaiveDateTime,
}

/// Message repository
pub struct MessageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every message, newest first.
    ///
    /// Ties on `fecha` fall back to `id` so rows inserted within the same
    /// clock tick still come back in insertion-reversed order.
    pub async fn list(&self) -> Result<Vec<Message>, DbError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, texto, fecha
            FROM messages
            ORDER BY fecha DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Insert a message; id and timestamp are assigned by the database.
    pub async fn create(&self, text: MessageText) -> Result<Message, DbError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (texto)
            VALUES ($1)
            RETURNING id, texto, fecha
            "#,
        )
        .bind(text.as_str())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = message.id, "Message created");
        Ok(message)
    }
}
