//! Shared utilities and types used across the API modules.

pub mod query;
pub mod types;

// Re-export commonly used items
pub use query::{format_datetime, path_segment, QueryParams};
pub use types::*;
