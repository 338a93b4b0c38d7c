//! Error Handling Module
//!
//! Defines the error type shared by every stage of batch mixing.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for MixMatch batch construction
#[derive(Error, Debug)]
pub enum MixMatchError {
    /// Shape or row-count mismatch, or an out-of-range parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by a predictor implementation
    #[error("Predictor error: {0}")]
    Predictor(String),

    /// Failure reported by (or about the output of) a transport mixup routine
    #[error("Mixup error: {0}")]
    Mixup(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Array construction error
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MixMatchError {
    /// Shorthand for an [`MixMatchError::InvalidArgument`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        MixMatchError::InvalidArgument(msg.into())
    }

    /// Whether this error is an argument/shape violation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MixMatchError::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for MixMatchError {
    fn from(err: serde_json::Error) -> Self {
        MixMatchError::Serialization(err.to_string())
    }
}

/// Convenience Result type for MixMatch operations
pub type Result<T> = std::result::Result<T, MixMatchError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| MixMatchError::InvalidArgument(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| MixMatchError::InvalidArgument(format!("{}: {}", f(), e)))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| MixMatchError::InvalidArgument(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| MixMatchError::InvalidArgument(f()))
    }
}
