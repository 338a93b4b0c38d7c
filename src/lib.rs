//! # OT MixMatch
//!
//! MixMatch-style batch construction for semi-supervised learning, with
//! label mixing done by 1-D optimal-transport barycenters.
//!
//! ## Modules
//!
//! - `augmentation`: Gaussian noise injection and noisy replication
//! - `inference`: the predictor capability used for pseudo-labelling
//! - `mixing`: label pools, merge/shuffle/split, and the batch mixer
//! - `utils`: error types and logging
//!
//! The transport mixup routine itself is supplied by the caller through
//! [`TransportMixup`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ot_mixmatch::utils::{init_logging, parse_level};
//! use ot_mixmatch::{BatchMixer, MixMatchConfig};
//!
//! init_logging(parse_level("debug"))?;
//! let config = MixMatchConfig::new().with_naug(4).with_k(3);
//! let mut rng = config.rng();
//! let mixer = BatchMixer::new(config, my_mixup)?;
//! let batches = mixer.mix(&model, x.view(), y.view(), u.view(), &mut rng)?;
//! ```

use ndarray::Array2;

pub mod augmentation;
pub mod inference;
pub mod mixing;
pub mod utils;

/// Feature batch: one sample per row
pub type Batch = Array2<f64>;

/// Predicted or ground-truth labels: one row per batch row
pub type LabelVector = Array2<f64>;

// Re-export commonly used items for convenience
pub use augmentation::{generate_noise, noisy_augment, AugmentedSet};
pub use inference::Predictor;
pub use mixing::{
    aggregate_pseudo_labels, mixmatch_ot1d, BatchMixer, LabelPool, MergedPool, MixMatchConfig,
    MixedBatches, MixupOutput, TransportMixup,
};
pub use utils::error::{MixMatchError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
