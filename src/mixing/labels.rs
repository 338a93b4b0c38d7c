//! Label pools
//!
//! A [`LabelPool`] keeps one label row per data row. Each row is treated as
//! a 1-D empirical distribution, so rows may have different lengths: a
//! ground-truth row carries the original label values while an aggregated
//! pseudo-label row carries one value per augmentation.

use ndarray::{Array2, ArrayView2};

use crate::utils::error::{MixMatchError, Result, ResultExt};

/// Row-aligned label distributions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelPool {
    rows: Vec<Vec<f64>>,
}

impl LabelPool {
    /// Create a pool from explicit rows
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Create a pool with one row per array row
    pub fn from_array(labels: ArrayView2<f64>) -> Self {
        Self {
            rows: labels.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the pool has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Label values of row `index`
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterate over rows in order
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Common row length, or `None` if the pool is empty or ragged
    pub fn width(&self) -> Option<usize> {
        let first = self.rows.first()?.len();
        self.rows.iter().all(|r| r.len() == first).then_some(first)
    }

    /// Rows of `self` followed by rows of `other`
    pub fn concat(&self, other: &LabelPool) -> LabelPool {
        let mut rows = Vec::with_capacity(self.len() + other.len());
        rows.extend(self.rows.iter().cloned());
        rows.extend(other.rows.iter().cloned());
        LabelPool { rows }
    }

    /// Reorder rows so that row `i` of the result is row `order[i]` of `self`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `order` has the wrong length or an index is out
    /// of range.
    pub fn select(&self, order: &[usize]) -> Result<LabelPool> {
        if order.len() != self.len() {
            return Err(MixMatchError::invalid(format!(
                "permutation of length {} applied to {} label rows",
                order.len(),
                self.len()
            )));
        }

        let rows = order
            .iter()
            .map(|&i| {
                self.rows
                    .get(i)
                    .cloned()
                    .with_context(|| format!("label row index {} out of range", i))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LabelPool { rows })
    }

    /// Split into rows `[0, mid)` and `[mid, len)`
    pub fn split_at(mut self, mid: usize) -> Result<(LabelPool, LabelPool)> {
        if mid > self.len() {
            return Err(MixMatchError::invalid(format!(
                "split point {} beyond {} label rows",
                mid,
                self.len()
            )));
        }

        let hi = self.rows.split_off(mid);
        Ok((self, LabelPool { rows: hi }))
    }

    /// Convert back into a rectangular array
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if rows have different lengths.
    pub fn to_array(&self) -> Result<Array2<f64>> {
        if self.is_empty() {
            return Ok(Array2::zeros((0, 0)));
        }

        let width = self
            .width()
            .ok_or_else(|| MixMatchError::invalid("label rows have different lengths"))?;
        let flat: Vec<f64> = self.rows.iter().flatten().copied().collect();

        Ok(Array2::from_shape_vec((self.len(), width), flat)?)
    }
}

impl From<&Array2<f64>> for LabelPool {
    fn from(labels: &Array2<f64>) -> Self {
        LabelPool::from_array(labels.view())
    }
}
