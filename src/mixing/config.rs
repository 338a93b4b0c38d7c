//! Mixing Configuration Module
//!
//! Hyperparameters for one MixMatch batch construction, with JSON
//! load/save so experiment runs can record exactly what they used.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::utils::error::{MixMatchError, Result};

/// Configuration for MixMatch with transport mixup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixMatchConfig {
    /// Standard deviation of the Gaussian augmentation noise
    pub stddev: f64,

    /// Beta distribution parameter forwarded to the mixup routine
    pub alpha: f64,

    /// Barycenter size forwarded to the mixup routine
    pub k: usize,

    /// Number of noisy copies of the unlabelled batch used for pseudo-labels
    pub naug: usize,

    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for MixMatchConfig {
    fn default() -> Self {
        Self {
            stddev: 0.01,
            alpha: 0.75,
            k: 3,
            naug: 5,
            seed: 42,
        }
    }
}

impl MixMatchConfig {
    /// Create new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set noise standard deviation
    pub fn with_stddev(mut self, stddev: f64) -> Self {
        self.stddev = stddev;
        self
    }

    /// Set mixup alpha
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set barycenter size
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set number of unlabelled augmentations
    pub fn with_naug(mut self, naug: usize) -> Self {
        self.naug = naug;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the parameters the mixer itself consumes
    ///
    /// `alpha` and `k` are passed through to the mixup routine untouched, so
    /// they are not checked here.
    pub fn validate_mixing(&self) -> Result<()> {
        if !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(MixMatchError::invalid(format!(
                "stddev must be finite and non-negative, got {}",
                self.stddev
            )));
        }

        if self.naug == 0 {
            return Err(MixMatchError::invalid("naug must be at least 1"));
        }

        Ok(())
    }

    /// Validate the whole configuration, including the mixup parameters
    pub fn validate(&self) -> Result<()> {
        self.validate_mixing()?;

        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(MixMatchError::invalid(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }

        if self.k == 0 {
            return Err(MixMatchError::invalid("k must be at least 1"));
        }

        Ok(())
    }

    /// Seeded generator for a reproducible mixing run
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Saved mixing config to {:?}", path);
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config
            .validate()
            .map_err(|e| MixMatchError::Config(format!("{:?}: {}", path, e)))?;
        info!("Loaded mixing config from {:?}", path);
        Ok(config)
    }
}
