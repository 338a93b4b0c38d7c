//! Utilities module for error handling and logging
//!
//! This module provides:
//! - The crate-wide error type and `Result` alias
//! - Structured logging with tracing

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{MixMatchError, Result, ResultExt};
pub use logging::{init_logging, parse_level};
