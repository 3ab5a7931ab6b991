//! msgboard-server: HTTP message board backed by PostgreSQL
//!
//! Accepts text messages via `POST /messages`, stores them with a
//! database-assigned id and timestamp, and lists them newest first via
//! `GET /messages`.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

use std::future::Future;

pub use config::{ConfigError, DbConfig};
pub use db::PoolConfig;
pub use error::{Error, Result};
pub use http::{AppState, ServerConfig};

/// What to do when the messages table cannot be verified at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Abort startup
    #[default]
    FailFast,
    /// Start listening immediately and verify the table in the background;
    /// storage routes answer 500 until the database is reachable and the
    /// table exists
    Lenient,
}

/// Everything needed to start the server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub pool: PoolConfig,
    pub server: ServerConfig,
    pub schema_policy: SchemaPolicy,
}

/// Start the HTTP server and run until `shutdown` resolves.
pub async fn serve<F>(config: AppConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(
        host = %config.db.host,
        port = config.db.port,
        database = %config.db.database,
        "Connecting to PostgreSQL"
    );

    let connect = config.db.connect_options();
    let pool = match config.schema_policy {
        SchemaPolicy::FailFast => {
            let pool = db::create_pool(connect, config.pool)
                .await
                .map_err(db::DbError::from)?;

            if let Err(e) = db::ensure_schema(&pool).await {
                tracing::error!(error = %e, "Failed to verify messages table");
                pool.close().await;
                return Err(e.into());
            }
            pool
        }
        SchemaPolicy::Lenient => {
            // Listen right away; the schema check finishes in the background
            let pool = db::create_lazy_pool(connect, config.pool);
            let check = pool.clone();
            tokio::spawn(async move {
                if let Err(e) = db::ensure_schema(&check).await {
                    tracing::error!(error = %e, "Failed to verify messages table");
                    tracing::warn!("Serving without a verified schema (lenient mode)");
                }
            });
            pool
        }
    };

    http::run_server(pool, config.server, shutdown).await?;
    Ok(())
}
