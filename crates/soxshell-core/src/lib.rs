//! soxshell-core: shared error type and configuration.
//!
//! This crate is the foundational dependency for the other soxshell crates,
//! providing the unified error type and the configuration sections for tool
//! location, process execution and logging.

pub mod config;
pub mod error;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
