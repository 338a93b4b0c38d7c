//! MixMatch batch construction over optimal-transport mixup
//!
//! This module provides:
//! - [`BatchMixer`]: the batch construction itself
//! - [`LabelPool`] and [`MergedPool`]: row-aligned label and data pools
//! - [`TransportMixup`]: the calling convention for the external mixup routine
//! - [`MixMatchConfig`]: hyperparameters with JSON load/save

pub mod config;
pub mod labels;
pub mod mixer;
pub mod mixup;
pub mod pool;

// Re-export main types for convenience
pub use config::MixMatchConfig;
pub use labels::LabelPool;
pub use mixer::{aggregate_pseudo_labels, mixmatch_ot1d, BatchMixer, MixedBatches};
pub use mixup::{MixupOutput, TransportMixup};
pub use pool::{MergedPool, PoolHalf};
