//! Root endpoint - liveness text, never touches the database

use axum::{routing::get, Router};

pub const ROOT_TEXT: &str = "Message API is running. Try /messages";

/// GET /
async fn root() -> &'static str {
    ROOT_TEXT
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
