//! MixMatch Batch Construction
//!
//! Builds one label-rich batch and one pseudo-labelled batch from a
//! labelled batch `(X, Y)` and an unlabelled batch `U`.
//!
//! ## Algorithm Overview
//!
//! 1. Add noise once to `X` (`x_hat`)
//! 2. Draw `naug` noisy copies of `U`; the last copy is the data anchor
//! 3. Predict every copy, stack the predictions column-wise into `Q` and
//!    sort each row of `Q` ascending
//! 4. Merge `x_hat` with the anchor and `Y` with `Q`
//! 5. Shuffle the merged pool in lockstep and split it at the midpoint
//! 6. Mix `x_hat` with the lower half and the anchor with the upper half

use ndarray::{concatenate, ArrayView2, Axis};
use rand::Rng;
use tracing::debug;

use crate::augmentation::{add_noise, noisy_augment, AugmentedSet};
use crate::inference::predictor::{predict_checked, Predictor};
use crate::mixing::config::MixMatchConfig;
use crate::mixing::labels::LabelPool;
use crate::mixing::mixup::{MixupOutput, TransportMixup};
use crate::mixing::pool::MergedPool;
use crate::utils::error::{MixMatchError, Result};
use crate::{Batch, LabelVector};

/// Output of one mixing call
#[derive(Debug, Clone, PartialEq)]
pub struct MixedBatches {
    /// Mixed labelled data
    pub x_prime: Batch,
    /// Barycenter labels for `x_prime`
    pub y_prime: LabelVector,
    /// Mixed unlabelled data
    pub u_prime: Batch,
    /// Barycenter pseudo-labels for `u_prime`
    pub q_prime: LabelVector,
}

impl MixedBatches {
    /// Unpack as `(x_prime, y_prime, u_prime, q_prime)`
    pub fn into_parts(self) -> (Batch, LabelVector, Batch, LabelVector) {
        (self.x_prime, self.y_prime, self.u_prime, self.q_prime)
    }
}

/// Predict every augmentation and build the sorted pseudo-label matrix
///
/// Predictions are stacked column-wise in generation order, then every row
/// is sorted ascending. The result therefore does not depend on which
/// augmentation produced which value.
pub fn aggregate_pseudo_labels<P: Predictor + ?Sized>(
    predictor: &P,
    augmentations: &[Batch],
) -> Result<LabelVector> {
    if augmentations.is_empty() {
        return Err(MixMatchError::invalid("no augmentations to predict"));
    }

    let preds = augmentations
        .iter()
        .map(|aug| predict_checked(predictor, aug.view()))
        .collect::<Result<Vec<_>>>()?;

    let views: Vec<ArrayView2<f64>> = preds.iter().map(|p| p.view()).collect();
    let mut q = concatenate(Axis(1), &views)?;

    for mut row in q.rows_mut() {
        let mut values = row.to_vec();
        values.sort_by(f64::total_cmp);
        for (dst, src) in row.iter_mut().zip(values) {
            *dst = src;
        }
    }

    Ok(q)
}

/// MixMatch batch mixer over a transport mixup routine
pub struct BatchMixer<M> {
    config: MixMatchConfig,
    mixup: M,
}

impl<M: TransportMixup> BatchMixer<M> {
    /// Create a mixer after checking `stddev` and `naug`
    ///
    /// `alpha` and `k` are forwarded to the mixup routine as given; any
    /// objection to them comes from that routine.
    pub fn new(config: MixMatchConfig, mixup: M) -> Result<Self> {
        config.validate_mixing()?;
        Ok(Self { config, mixup })
    }

    /// Create a mixer with default hyperparameters
    pub fn with_defaults(mixup: M) -> Self {
        Self {
            config: MixMatchConfig::default(),
            mixup,
        }
    }

    /// Hyperparameters used by every `mix` call
    pub fn config(&self) -> &MixMatchConfig {
        &self.config
    }

    /// Mix a labelled batch `(x, y)` with an unlabelled batch `u`
    ///
    /// All randomness (noise, shuffle, and whatever the mixup routine draws)
    /// comes from `rng`, so a seeded generator gives a reproducible result.
    ///
    /// The unlabelled anchor is the last of the `naug` copies used for
    /// pseudo-labelling rather than an independent draw, so its noise is
    /// shared with one column of `Q`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on row or feature count mismatches, checked before
    /// the predictor or mixup routine is called. Errors from the predictor
    /// and the mixup routine are returned as they are.
    pub fn mix<P, R>(
        &self,
        predictor: &P,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        u: ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<MixedBatches>
    where
        P: Predictor + ?Sized,
        R: Rng,
    {
        if x.nrows() != y.nrows() {
            return Err(MixMatchError::invalid(format!(
                "labelled batch has {} rows but {} label rows",
                x.nrows(),
                y.nrows()
            )));
        }
        if x.ncols() != u.ncols() {
            return Err(MixMatchError::invalid(format!(
                "labelled batch has {} features, unlabelled batch has {}",
                x.ncols(),
                u.ncols()
            )));
        }

        let MixMatchConfig { stddev, naug, .. } = self.config;

        let x_hat = add_noise(x, stddev, rng)?;

        let u_label_sources: AugmentedSet = noisy_augment(u, stddev, naug, rng)?;
        let u_anchor = u_label_sources
            .last()
            .cloned()
            .ok_or_else(|| MixMatchError::invalid("naug must be at least 1"))?;
        debug!(
            labelled_rows = x.nrows(),
            unlabelled_rows = u.nrows(),
            copies = u_label_sources.len(),
            "augmented batches"
        );

        let q = aggregate_pseudo_labels(predictor, &u_label_sources)?;
        debug!(rows = q.nrows(), columns = q.ncols(), "aggregated pseudo-labels");

        let y_pool = LabelPool::from_array(y);
        let q_pool = LabelPool::from_array(q.view());

        let mut pool = MergedPool::merge(x_hat.view(), &y_pool, u_anchor.view(), &q_pool)?;
        pool.shuffle(rng)?;
        let (lo, hi) = pool.split_half()?;
        debug!(
            lo_rows = lo.labels.len(),
            hi_rows = hi.labels.len(),
            "split merged pool"
        );

        let labelled = self.mix_pair(x_hat.view(), lo.data.view(), &y_pool, &lo.labels, rng)?;
        let unlabelled = self.mix_pair(u_anchor.view(), hi.data.view(), &q_pool, &hi.labels, rng)?;

        Ok(MixedBatches {
            x_prime: labelled.data,
            y_prime: labelled.labels,
            u_prime: unlabelled.data,
            q_prime: unlabelled.labels,
        })
    }

    fn mix_pair<R: Rng>(
        &self,
        anchor: ArrayView2<f64>,
        pool: ArrayView2<f64>,
        anchor_labels: &LabelPool,
        pool_labels: &LabelPool,
        rng: &mut R,
    ) -> Result<MixupOutput> {
        if anchor.nrows() != anchor_labels.len() {
            return Err(MixMatchError::invalid(format!(
                "mixup anchor has {} rows but {} label rows",
                anchor.nrows(),
                anchor_labels.len()
            )));
        }
        if pool.nrows() != pool_labels.len() {
            return Err(MixMatchError::invalid(format!(
                "mixup pool has {} rows but {} label rows",
                pool.nrows(),
                pool_labels.len()
            )));
        }

        let out = self.mixup.mixup(
            anchor,
            pool,
            anchor_labels,
            pool_labels,
            self.config.alpha,
            self.config.k,
            rng,
        )?;
        out.ensure_aligned()?;
        Ok(out)
    }
}

/// Run one MixMatch batch construction with explicit hyperparameters
#[allow(clippy::too_many_arguments)]
pub fn mixmatch_ot1d<P, M, R>(
    predictor: &P,
    mixup: &M,
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    u: ArrayView2<f64>,
    stddev: f64,
    alpha: f64,
    k: usize,
    naug: usize,
    rng: &mut R,
) -> Result<MixedBatches>
where
    P: Predictor + ?Sized,
    M: TransportMixup + ?Sized,
    R: Rng,
{
    let config = MixMatchConfig {
        stddev,
        alpha,
        k,
        naug,
        ..Default::default()
    };
    BatchMixer::new(config, mixup)?.mix(predictor, x, y, u, rng)
}
