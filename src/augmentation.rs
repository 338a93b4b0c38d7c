//! Noise Augmentation Module
//!
//! Gaussian noise injection for feature batches. Every copy produced here
//! gets its own noise draw; nothing is shared between copies.

use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::utils::error::{MixMatchError, Result, ResultExt};
use crate::Batch;

/// Ordered noisy copies of one batch, in generation order
pub type AugmentedSet = Vec<Batch>;

fn normal(stddev: f64) -> Result<Normal<f64>> {
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(MixMatchError::invalid(format!(
            "stddev must be finite and non-negative, got {}",
            stddev
        )));
    }
    Normal::new(0.0, stddev).context("noise distribution")
}

/// Draw zero-mean Gaussian noise with the same shape as `x`
///
/// Entries are independent `N(0, stddev^2)` samples. A `stddev` of zero
/// yields an all-zero array.
pub fn generate_noise<R: Rng + ?Sized>(x: ArrayView2<f64>, stddev: f64, rng: &mut R) -> Result<Array2<f64>> {
    let dist = normal(stddev)?;
    Ok(Array2::from_shape_fn(x.raw_dim(), |_| dist.sample(&mut *rng)))
}

/// Return `x` plus one fresh noise draw
pub fn add_noise<R: Rng + ?Sized>(x: ArrayView2<f64>, stddev: f64, rng: &mut R) -> Result<Batch> {
    let noise = generate_noise(x, stddev, rng)?;
    Ok(&x + &noise)
}

/// Create `k` independently noise-perturbed copies of `x`
///
/// # Errors
///
/// `InvalidArgument` when `k == 0` or `stddev` is negative.
pub fn noisy_augment<R: Rng + ?Sized>(
    x: ArrayView2<f64>,
    stddev: f64,
    k: usize,
    rng: &mut R,
) -> Result<AugmentedSet> {
    if k == 0 {
        return Err(MixMatchError::invalid("number of augmentations must be at least 1"));
    }

    let mut augs = Vec::with_capacity(k);
    for _ in 0..k {
        augs.push(add_noise(x, stddev, rng)?);
    }

    Ok(augs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_noise_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let x = Array2::<f64>::zeros((6, 3));
        let noise = generate_noise(x.view(), 0.5, &mut rng).unwrap();
        assert_eq!(noise.dim(), (6, 3));
    }

    #[test]
    fn test_zero_stddev_is_exact_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let noise = generate_noise(x.view(), 0.0, &mut rng).unwrap();
        assert!(noise.iter().all(|&v| v == 0.0));

        let noisy = add_noise(x.view(), 0.0, &mut rng).unwrap();
        assert_eq!(noisy, x);
    }

    #[test]
    fn test_negative_stddev_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let x = Array2::<f64>::zeros((2, 2));

        let err = generate_noise(x.view(), -0.1, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = generate_noise(x.view(), f64::NAN, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_noise_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let x = Array2::<f64>::zeros((200, 50));
        let noise = generate_noise(x.view(), 2.0, &mut rng).unwrap();

        let n = noise.len() as f64;
        let mean = noise.sum() / n;
        let var = noise.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        assert!(mean.abs() < 0.1, "mean {} too far from 0", mean);
        assert!((var.sqrt() - 2.0).abs() < 0.1, "stddev {} too far from 2", var.sqrt());
    }

    #[test]
    fn test_noisy_augment_count_and_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let x = Array2::<f64>::ones((4, 2));

        let augs = noisy_augment(x.view(), 0.01, 5, &mut rng).unwrap();
        assert_eq!(augs.len(), 5);
        for aug in &augs {
            assert_eq!(aug.dim(), x.dim());
        }
    }

    #[test]
    fn test_noisy_augment_singleton() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let x = array![[1.0, -1.0]];

        let augs = noisy_augment(x.view(), 0.0, 1, &mut rng).unwrap();
        assert_eq!(augs, vec![x]);
    }

    #[test]
    fn test_noisy_augment_copies_are_independent() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let x = Array2::<f64>::zeros((3, 3));

        let augs = noisy_augment(x.view(), 1.0, 2, &mut rng).unwrap();
        assert_ne!(augs[0], augs[1]);
    }

    #[test]
    fn test_noisy_augment_zero_copies_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let x = Array2::<f64>::zeros((2, 2));

        let err = noisy_augment(x.view(), 0.01, 0, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
