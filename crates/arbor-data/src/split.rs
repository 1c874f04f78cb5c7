//! Seeded train/test partitioning.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::DataError;

/// The two halves produced by [`train_test_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    /// Training rows.
    pub train_features: Vec<Vec<f64>>,
    /// Training labels, aligned with `train_features`.
    pub train_labels: Vec<usize>,
    /// Held-out rows.
    pub test_features: Vec<Vec<f64>>,
    /// Held-out labels, aligned with `test_features`.
    pub test_labels: Vec<usize>,
}

/// Shuffle the samples and hold out `ceil(n * test_fraction)` of them.
///
/// # Errors
///
/// | Variant                            | When                                  |
/// |------------------------------------|---------------------------------------|
/// | [`DataError::LengthMismatch`]      | `features.len() != labels.len()`      |
/// | [`DataError::InvalidTestFraction`] | `test_fraction` is not in (0.0, 1.0)  |
/// | [`DataError::SplitTooSmall`]       | either side would be empty            |
pub fn train_test_split(
    features: &[Vec<f64>],
    labels: &[usize],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, DataError> {
    if features.len() != labels.len() {
        return Err(DataError::LengthMismatch {
            n_samples: features.len(),
            n_labels: labels.len(),
        });
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DataError::InvalidTestFraction {
            fraction: test_fraction,
        });
    }

    let n_samples = features.len();
    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(DataError::SplitTooSmall {
            n_samples,
            fraction: test_fraction,
        });
    }

    let mut order: Vec<usize> = (0..n_samples).collect();
    order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let (test_idx, train_idx) = order.split_at(n_test);

    let take_rows = |idx: &[usize]| -> Vec<Vec<f64>> {
        idx.iter().map(|&i| features[i].clone()).collect()
    };
    let take_labels = |idx: &[usize]| -> Vec<usize> { idx.iter().map(|&i| labels[i]).collect() };

    debug!(n_train = train_idx.len(), n_test, "split dataset");

    Ok(TrainTestSplit {
        train_features: take_rows(train_idx),
        train_labels: take_labels(train_idx),
        test_features: take_rows(test_idx),
        test_labels: take_labels(test_idx),
    })
}
