//! In-flight request counting
//!
//! The drain itself is axum's graceful shutdown; this counter reports how
//! many requests were pending when it started and how many it abandoned.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

/// Counter of requests currently being handled
#[derive(Clone, Default)]
pub struct InFlight {
    count: Arc<AtomicUsize>,
}

/// Decrements the counter when dropped
pub struct InFlightGuard {
    count: Arc<AtomicUsize>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests currently in flight
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Mark a request as started
    pub fn enter(&self) -> InFlightGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            count: Arc::clone(&self.count),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Middleware: hold a guard for the lifetime of the handler
pub async fn track(State(in_flight): State<InFlight>, req: Request, next: Next) -> Response {
    let _guard = in_flight.enter();
    next.run(req).await
}
