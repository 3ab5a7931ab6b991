//! Configuration check command
//!
//! Resolves database settings from the environment (and `.env`) without
//! connecting, so deployments can be validated before starting the server.

use anyhow::{Context, Result};

use msgboard_server::DbConfig;

/// Print the resolved configuration, password redacted
pub fn run_config() -> Result<()> {
    let db = DbConfig::from_env().context("Invalid database configuration")?;

    println!("user:     {}", db.user);
    println!("host:     {}", db.host);
    println!("port:     {}", db.port);
    println!("database: {}", db.database);
    println!("password: ***");

    Ok(())
}
