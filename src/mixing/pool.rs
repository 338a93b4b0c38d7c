//! Merged data/label pool
//!
//! Holds the concatenation of the noisy labelled batch and the unlabelled
//! anchor, together with their label rows. The pool is shuffled in
//! lockstep and then split at the midpoint, one half per mixup call.

use ndarray::{concatenate, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::mixing::labels::LabelPool;
use crate::utils::error::{MixMatchError, Result};
use crate::Batch;

/// Data rows and their label rows, kept in the same order
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPool {
    data: Batch,
    labels: LabelPool,
}

/// One half of a split pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolHalf {
    pub data: Batch,
    pub labels: LabelPool,
}

impl MergedPool {
    /// Pair a batch with its label rows
    pub fn new(data: Batch, labels: LabelPool) -> Result<Self> {
        if data.nrows() != labels.len() {
            return Err(MixMatchError::invalid(format!(
                "pool has {} data rows but {} label rows",
                data.nrows(),
                labels.len()
            )));
        }
        Ok(Self { data, labels })
    }

    /// Stack `(x, x_labels)` on top of `(u, u_labels)`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the feature widths differ or the merged data and
    /// label row counts disagree.
    pub fn merge<'a>(
        x: ArrayView2<'a, f64>,
        x_labels: &LabelPool,
        u: ArrayView2<'a, f64>,
        u_labels: &LabelPool,
    ) -> Result<Self> {
        if x.ncols() != u.ncols() {
            return Err(MixMatchError::invalid(format!(
                "cannot merge batches with {} and {} features",
                x.ncols(),
                u.ncols()
            )));
        }

        let data = concatenate(Axis(0), &[x, u])?;
        let labels = x_labels.concat(u_labels);
        Self::new(data, labels)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the pool has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merged data rows
    pub fn data(&self) -> &Batch {
        &self.data
    }

    /// Merged label rows
    pub fn labels(&self) -> &LabelPool {
        &self.labels
    }

    /// Apply one random permutation to both data and labels
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        self.permute(&order)
    }

    /// Reorder rows so that row `i` becomes row `order[i]` of the current pool
    pub fn permute(&mut self, order: &[usize]) -> Result<()> {
        let labels = self.labels.select(order)?;
        self.data = self.data.select(Axis(0), order);
        self.labels = labels;
        Ok(())
    }

    /// Split at `len / 2` (rounded down)
    pub fn split_half(self) -> Result<(PoolHalf, PoolHalf)> {
        let mid = self.len() / 2;

        let lo_data = self.data.slice_axis(Axis(0), (..mid).into()).to_owned();
        let hi_data = self.data.slice_axis(Axis(0), (mid..).into()).to_owned();
        let (lo_labels, hi_labels) = self.labels.split_at(mid)?;

        Ok((
            PoolHalf { data: lo_data, labels: lo_labels },
            PoolHalf { data: hi_data, labels: hi_labels },
        ))
    }
}
