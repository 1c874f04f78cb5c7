//! Exhaustive best-split search.

use crate::criterion::{SplitCriterion, class_counts};
use crate::dataset::ColumnarDataset;
use crate::error::TreeError;
use crate::node::FeatureIndex;

/// Gains within this multiple of the parent impurity (at least 1.0) of zero
/// are rounding noise and are reported as exactly `0.0`.
const GAIN_TOLERANCE: f64 = 64.0 * f64::EPSILON;

/// The winning `(feature, threshold)` pair for a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSplit {
    /// Feature used for the split.
    pub feature: FeatureIndex,
    /// Samples with `x[feature] <= threshold` go left. Always an observed value.
    pub threshold: f64,
    /// Parent impurity minus the sample-weighted child impurities.
    pub gain: f64,
}

/// A chosen split together with the resulting partition of the samples.
#[derive(Debug, Clone)]
pub(crate) struct SplitCandidate {
    pub(crate) split: BestSplit,
    pub(crate) left_indices: Vec<usize>,
    pub(crate) right_indices: Vec<usize>,
}

/// Find the split with the highest information gain over row-major data.
///
/// Returns `Ok(None)` when every feature is constant, so no candidate
/// leaves both sides non-empty. The returned gain may be zero or negative.
///
/// # Errors
///
/// Fails with the same shape and label errors as
/// [`DecisionTreeClassifier::fit`](crate::DecisionTreeClassifier::fit).
pub fn best_split(
    features: &[Vec<f64>],
    labels: &[usize],
    criterion: SplitCriterion,
) -> Result<Option<BestSplit>, TreeError> {
    let data = ColumnarDataset::from_rows(features, labels)?;
    let sample_indices: Vec<usize> = (0..data.n_samples()).collect();
    Ok(find_best_split(&data, &sample_indices, criterion).map(|c| c.split))
}

/// Evaluate every distinct value of every feature as a threshold.
///
/// Each feature column is sorted once and scanned left to right with
/// incremental class counts, so a candidate costs O(C) instead of O(N).
/// Candidates are visited feature-major with ascending thresholds and only a
/// strictly greater gain replaces the incumbent: the first best pair wins.
///
/// `min_samples_leaf` is deliberately not considered here; the builder
/// checks it against the winning split only.
pub(crate) fn find_best_split(
    data: &ColumnarDataset,
    sample_indices: &[usize],
    criterion: SplitCriterion,
) -> Option<SplitCandidate> {
    let n_samples = sample_indices.len();
    if n_samples < 2 {
        return None;
    }

    let labels = &data.labels;
    let parent_counts = class_counts(
        sample_indices.iter().map(|&si| labels[si]),
        data.n_classes(),
    );
    let parent_impurity = criterion.impurity(&parent_counts, n_samples).value();
    let n = n_samples as f64;
    let tolerance = GAIN_TOLERANCE * parent_impurity.max(1.0);

    let mut best: Option<BestSplit> = None;
    let mut sorted: Vec<(f64, usize)> = Vec::with_capacity(n_samples);

    for (feat_idx, column) in data.columns.iter().enumerate() {
        sorted.clear();
        sorted.extend(sample_indices.iter().map(|&si| (column[si], si)));
        sorted.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_counts = vec![0usize; data.n_classes()];
        let mut right_counts = parent_counts.clone();

        for i in 0..n_samples {
            let (value, si) = sorted[i];
            left_counts[labels[si]] += 1;
            right_counts[labels[si]] -= 1;

            // Only evaluate once every sample equal to `value` is on the left.
            if i + 1 < n_samples && sorted[i + 1].0 == value {
                continue;
            }

            let n_left = i + 1;
            let n_right = n_samples - n_left;
            if n_right == 0 {
                continue;
            }

            let left_impurity = criterion.impurity(&left_counts, n_left).value();
            let right_impurity = criterion.impurity(&right_counts, n_right).value();
            let weighted = (n_left as f64 * left_impurity + n_right as f64 * right_impurity) / n;
            let mut gain = parent_impurity - weighted;
            if gain.abs() <= tolerance {
                gain = 0.0;
            }

            if best.is_none_or(|b| gain > b.gain) {
                best = Some(BestSplit {
                    feature: FeatureIndex::new(feat_idx),
                    threshold: value,
                    gain,
                });
            }
        }
    }

    let split = best?;
    let column = &data.columns[split.feature.index()];
    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = sample_indices
        .iter()
        .copied()
        .partition(|&si| column[si] <= split.threshold);

    Some(SplitCandidate {
        split,
        left_indices,
        right_indices,
    })
}
