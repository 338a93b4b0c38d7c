//! Transport mixup capability
//!
//! The barycentric mixup routine (1-D optimal transport between label
//! distributions, Beta-distributed mixing weight) is supplied by the caller.
//! This crate only fixes its calling convention.

use ndarray::{Array2, ArrayView2};
use rand::RngCore;

use crate::mixing::labels::LabelPool;
use crate::utils::error::{MixMatchError, Result};

/// Mixed data rows and their barycentric label rows
#[derive(Debug, Clone, PartialEq)]
pub struct MixupOutput {
    /// Mixed feature rows
    pub data: Array2<f64>,
    /// Barycenter labels, one row per mixed data row, `k` columns
    pub labels: Array2<f64>,
}

impl MixupOutput {
    /// Pair mixed data with its labels
    pub fn new(data: Array2<f64>, labels: Array2<f64>) -> Self {
        Self { data, labels }
    }

    /// Check that every mixed data row has a label row
    pub fn ensure_aligned(&self) -> Result<()> {
        if self.data.nrows() != self.labels.nrows() {
            return Err(MixMatchError::Mixup(format!(
                "mixup returned {} data rows but {} label rows",
                self.data.nrows(),
                self.labels.nrows()
            )));
        }
        Ok(())
    }
}

/// Optimal-transport mixup between an anchor batch and a pool batch
///
/// `alpha` parameterises the Beta distribution of the mixing weight and `k`
/// is the number of barycenter support points per output label row. The
/// routine draws its randomness from `rng` so that a seeded mixing call is
/// reproducible end to end.
pub trait TransportMixup {
    #[allow(clippy::too_many_arguments)]
    fn mixup(
        &self,
        anchor: ArrayView2<f64>,
        pool: ArrayView2<f64>,
        anchor_labels: &LabelPool,
        pool_labels: &LabelPool,
        alpha: f64,
        k: usize,
        rng: &mut dyn RngCore,
    ) -> Result<MixupOutput>;
}

impl<T: TransportMixup + ?Sized> TransportMixup for &T {
    fn mixup(
        &self,
        anchor: ArrayView2<f64>,
        pool: ArrayView2<f64>,
        anchor_labels: &LabelPool,
        pool_labels: &LabelPool,
        alpha: f64,
        k: usize,
        rng: &mut dyn RngCore,
    ) -> Result<MixupOutput> {
        (**self).mixup(anchor, pool, anchor_labels, pool_labels, alpha, k, rng)
    }
}

impl<T: TransportMixup + ?Sized> TransportMixup for Box<T> {
    fn mixup(
        &self,
        anchor: ArrayView2<f64>,
        pool: ArrayView2<f64>,
        anchor_labels: &LabelPool,
        pool_labels: &LabelPool,
        alpha: f64,
        k: usize,
        rng: &mut dyn RngCore,
    ) -> Result<MixupOutput> {
        (**self).mixup(anchor, pool, anchor_labels, pool_labels, alpha, k, rng)
    }
}
