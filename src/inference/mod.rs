//! Inference module for pseudo-label prediction
//!
//! This module provides:
//! - The [`Predictor`] capability consumed by the batch mixer
//! - Row-count checking of predictor output
//!
//! Models live outside this crate; anything that maps a feature batch to
//! one label row per input row can be plugged in.

pub mod predictor;

// Re-export main types for convenience
pub use predictor::{predict_checked, Predictor};
