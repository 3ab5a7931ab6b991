//! HTTP server command
//!
//! Validates configuration, then runs the message API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use msgboard_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use msgboard_server::http::shutdown_signal;
use msgboard_server::{AppConfig, DbConfig, PoolConfig, SchemaPolicy, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "MSGBOARD_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds a request waits for a database connection before failing
    #[arg(long, default_value_t = 30)]
    pub acquire_timeout: u64,

    /// Seconds to let in-flight requests finish after a shutdown signal
    #[arg(long, default_value_t = 10)]
    pub drain_timeout: u64,

    /// Keep serving if the messages table cannot be verified at startup
    #[arg(long, env = "MSGBOARD_LENIENT_SCHEMA")]
    pub lenient_schema: bool,
}

impl ServeArgs {
    fn app_config(&self, db: DbConfig) -> AppConfig {
        AppConfig {
            db,
            pool: PoolConfig {
                max_connections: self.max_connections,
                acquire_timeout: Duration::from_secs(self.acquire_timeout),
            },
            server: ServerConfig {
                bind_addr: self.bind,
                drain_timeout: Duration::from_secs(self.drain_timeout),
            },
            schema_policy: if self.lenient_schema {
                SchemaPolicy::Lenient
            } else {
                SchemaPolicy::FailFast
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = DbConfig::from_env().context("Invalid database configuration")?;
    let config = args.app_config(db);

    tracing::info!("Starting msgboard server on {}", config.server.bind_addr);

    // Run server (blocks until shutdown)
    msgboard_server::serve(config, shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> DbConfig {
        DbConfig {
            user: "u".into(),
            host: "h".into(),
            database: "d".into(),
            password: "p".into(),
            port: 5432,
        }
    }

    #[test]
    fn defaults_map_to_app_config() {
        let args = ServeArgs::try_parse_from(["serve"]).unwrap();
        let config = args.app_config(db());

        assert_eq!(config.server.bind_addr.port(), 3000);
        assert_eq!(config.server.drain_timeout, Duration::from_secs(10));
        assert_eq!(config.pool, PoolConfig::default());
        assert_eq!(config.schema_policy, SchemaPolicy::FailFast);
    }

    #[test]
    fn lenient_flag_selects_lenient_policy() {
        let args = ServeArgs::try_parse_from(["serve", "--lenient-schema", "-b", "127.0.0.1:8080"])
            .unwrap();
        let config = args.app_config(db());

        assert_eq!(config.schema_policy, SchemaPolicy::Lenient);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080".parse().unwrap());
    }
}
