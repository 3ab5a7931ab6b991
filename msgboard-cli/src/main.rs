//! msgboard CLI - runs the message board HTTP API
//!
//! - `serve`: start the HTTP server
//! - `config`: validate database settings from the environment

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "msgboard",
    author,
    version,
    about = "Minimal message board API backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check database configuration from the environment (no connection is made)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so `.env` values feed clap's env fallbacks
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Config => commands::config::run_config(),
    }
}
