//! Error types for msgboard-server startup

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::http::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Database(#[from] DbError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
