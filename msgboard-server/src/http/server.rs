//! Axum server setup and lifecycle
//!
//! Server skeleton with:
//! - Tracing middleware
//! - In-flight request counting for shutdown logs
//! - Graceful shutdown: stop accepting, drain, then close the pool

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;

use super::inflight::{self, InFlight};
use super::routes;

/// Default time to wait for in-flight requests after a shutdown signal
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on closing the pool once the drain has timed out
pub const POOL_CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// How long shutdown waits for in-flight requests before closing the pool
    pub drain_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// Build the application router with all routes
pub fn build_router(state: AppState, in_flight: InFlight) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::messages::router())
        .layer(middleware::from_fn_with_state(in_flight, inflight::track))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `config.bind_addr` and serve until `shutdown` resolves.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(db.connect_options(), PoolConfig::default()).await?;
/// run_server(pool, ServerConfig::default(), shutdown_signal()).await?;
/// ```
pub async fn run_server<F>(pool: PgPool, config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve_on(listener, pool, config.drain_timeout, shutdown).await
}

/// Serve on an already-bound listener.
///
/// Once `shutdown` resolves the listener stops accepting, in-flight
/// requests get up to `drain_timeout` to finish, and the pool is closed.
/// The pool is closed on every exit path. After a timed-out drain the close
/// itself is capped at `POOL_CLOSE_GRACE`, since abandoned handlers may still
/// hold connections.
pub async fn serve_on<F>(
    listener: TcpListener,
    pool: PgPool,
    drain_timeout: Duration,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let in_flight = InFlight::new();
    let app = build_router(AppState { pool: pool.clone() }, in_flight.clone());

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });
    tracing::info!("Server listening on {}", addr);

    let outcome = tokio::select! {
        joined = &mut server => {
            tracing::warn!("Server stopped without a shutdown signal");
            Drain::Complete(flatten(joined))
        }
        () = shutdown => {
            let _ = stop_tx.send(());
            drain(&mut server, &in_flight, drain_timeout).await
        }
    };

    match outcome {
        Drain::Complete(result) => {
            pool.close().await;
            tracing::info!("Database pool closed");
            result
        }
        Drain::TimedOut => {
            if tokio::time::timeout(POOL_CLOSE_GRACE, pool.close()).await.is_ok() {
                tracing::info!("Database pool closed");
            } else {
                tracing::warn!(
                    grace_secs = POOL_CLOSE_GRACE.as_secs_f64(),
                    "Pool close timed out, abandoning checked-out connections"
                );
            }
            Ok(())
        }
    }
}

/// How the post-signal drain ended
enum Drain {
    Complete(Result<(), ServerError>),
    TimedOut,
}

/// Wait for graceful shutdown, which finishes once every open connection has
/// been answered, up to `drain_timeout`.
async fn drain(
    server: &mut tokio::task::JoinHandle<std::io::Result<()>>,
    in_flight: &InFlight,
    drain_timeout: Duration,
) -> Drain {
    tracing::info!(in_flight = in_flight.count(), "Draining in-flight requests");

    match tokio::time::timeout(drain_timeout, &mut *server).await {
        Ok(joined) => {
            tracing::info!("Server shutdown complete");
            Drain::Complete(flatten(joined))
        }
        Err(_) => {
            tracing::warn!(
                abandoned = in_flight.count(),
                timeout_secs = drain_timeout.as_secs_f64(),
                "Drain timeout elapsed, abandoning in-flight requests"
            );
            server.abort();
            Drain::TimedOut
        }
    }
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), ServerError> {
    joined??;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
