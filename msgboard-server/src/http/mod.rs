//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - In-flight request tracking
//! - Graceful shutdown with a bounded drain
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod inflight;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use inflight::InFlight;
pub use server::{build_router, run_server, serve_on, shutdown_signal, AppState, ServerConfig, ServerError};
