//! Validation error types

use thiserror::Error;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is missing, null, or empty
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Body could not be parsed as the expected JSON shape
    #[error("invalid request body: {reason}")]
    InvalidBody { reason: String },
}
