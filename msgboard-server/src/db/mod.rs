//! Database layer - connection pool, schema, and repositories
//!
//! - Handlers borrow the pool; each query checks a connection out and
//!   returns it when the query future completes or is dropped
//! - No Arc<Mutex<Connection>>

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_lazy_pool, create_pool, PoolConfig};
pub use repos::*;
pub use schema::ensure_schema;
