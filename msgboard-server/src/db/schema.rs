//! Schema initialization for the messages table

use sqlx::PgPool;

use super::DbError;

const CREATE_MESSAGES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        texto VARCHAR(255) NOT NULL,
        fecha TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the messages table if it does not exist.
///
/// Idempotent; safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::debug!("Ensuring messages table exists");

    sqlx::query(CREATE_MESSAGES_TABLE).execute(pool).await?;

    tracing::info!(table = "messages", "Table verified");
    Ok(())
}
