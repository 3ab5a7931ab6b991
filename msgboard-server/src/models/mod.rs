//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod message;
pub mod validation;

pub use message::{MessageText, MAX_TEXT_CHARS};
pub use validation::ValidationError;
