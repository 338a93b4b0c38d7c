//! Inference Predictor Module
//!
//! A trained model seen from the mixer: read-only, one label row out for
//! every feature row in.

use ndarray::{Array2, ArrayView2};

use crate::utils::error::{MixMatchError, Result};
use crate::LabelVector;

/// Label predictor for feature batches
///
/// Implementations must return exactly one row per input row and must not
/// mutate model state. Errors are forwarded to the caller of
/// [`crate::BatchMixer::mix`] untouched, so implementations should report
/// their own failures as [`MixMatchError::Predictor`].
pub trait Predictor {
    /// Predict a label row for every row in `batch`
    fn predict(&self, batch: ArrayView2<f64>) -> Result<LabelVector>;
}

impl<F> Predictor for F
where
    F: Fn(ArrayView2<f64>) -> Result<Array2<f64>>,
{
    fn predict(&self, batch: ArrayView2<f64>) -> Result<LabelVector> {
        self(batch)
    }
}

/// Run `predictor` on `batch` and check the output row count
pub fn predict_checked<P: Predictor + ?Sized>(predictor: &P, batch: ArrayView2<f64>) -> Result<LabelVector> {
    let labels = predictor.predict(batch)?;

    if labels.nrows() != batch.nrows() {
        return Err(MixMatchError::invalid(format!(
            "predictor returned {} label rows for {} input rows",
            labels.nrows(),
            batch.nrows()
        )));
    }

    Ok(labels)
}
