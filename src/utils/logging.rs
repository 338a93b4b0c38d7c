//! Logging setup
//!
//! The library only emits `tracing` events; the mixer reports each step at
//! DEBUG with row and column counts as fields. Binaries and experiment
//! scripts install a subscriber once with [`init_logging`].

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::utils::error::{MixMatchError, Result};

/// Parse a level name such as `"debug"` or `"WARN"`, `INFO` if unrecognised
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install a compact fmt subscriber as the global default
///
/// # Errors
///
/// `Config` if a global subscriber is already installed.
pub fn init_logging(max_level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(max_level >= Level::DEBUG)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MixMatchError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("INFO"), Level::INFO);
        assert_eq!(parse_level("Warning"), Level::WARN);
        assert_eq!(parse_level("unknown"), Level::INFO);
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call runs first in this process wins; a repeat must fail
        let _ = init_logging(Level::WARN);
        let err = init_logging(Level::DEBUG).unwrap_err();
        assert!(matches!(err, MixMatchError::Config(_)));
    }
}
