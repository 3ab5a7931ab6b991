//! Route handlers organized by resource

pub mod messages;
pub mod root;
