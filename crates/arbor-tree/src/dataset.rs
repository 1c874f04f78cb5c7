//! Validated, column-major view of a training set.

use crate::error::TreeError;

/// Labels at or above this value are rejected; class counts are bucketed by
/// label value, so the label space has to stay small.
pub const MAX_CLASSES: usize = 1 << 16;

/// Training data transposed to `columns[feature_idx][sample_idx]`.
///
/// Construction performs every shape and label check up front so that
/// induction never starts on malformed input. Labels are remapped onto the
/// dense ids `0..classes.len()` in ascending label order, so class counts
/// scale with the number of distinct labels, not with the largest one.
#[derive(Debug, Clone)]
pub(crate) struct ColumnarDataset {
    pub(crate) columns: Vec<Vec<f64>>,
    /// Dense class id per sample.
    pub(crate) labels: Vec<usize>,
    /// Original label value per dense class id, ascending.
    pub(crate) classes: Vec<usize>,
}

impl ColumnarDataset {
    /// Validate row-major `features` and aligned `labels`, then transpose.
    pub(crate) fn from_rows(features: &[Vec<f64>], labels: &[usize]) -> Result<Self, TreeError> {
        if features.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        if labels.len() != features.len() {
            return Err(TreeError::LabelCountMismatch {
                n_samples: features.len(),
                n_labels: labels.len(),
            });
        }

        let n_features = features[0].len();
        if n_features == 0 {
            return Err(TreeError::ZeroFeatures);
        }

        for (sample_index, row) in features.iter().enumerate() {
            if row.len() != n_features {
                return Err(TreeError::RaggedRow {
                    expected: n_features,
                    got: row.len(),
                    sample_index,
                });
            }
            if let Some(feature_index) = row.iter().position(|v| !v.is_finite()) {
                return Err(TreeError::NonFiniteValue {
                    sample_index,
                    feature_index,
                });
            }
        }

        if let Some(sample_index) = labels.iter().position(|&l| l >= MAX_CLASSES) {
            return Err(TreeError::InvalidLabel {
                sample_index,
                reason: format!(
                    "label {} exceeds the supported maximum of {}",
                    labels[sample_index],
                    MAX_CLASSES - 1
                ),
            });
        }

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let dense: Vec<usize> = labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_else(|i| i))
            .collect();

        let columns: Vec<Vec<f64>> = (0..n_features)
            .map(|feat_idx| features.iter().map(|row| row[feat_idx]).collect())
            .collect();

        Ok(Self {
            columns,
            labels: dense,
            classes,
        })
    }

    pub(crate) fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Number of distinct labels, the length of every class-count vector.
    pub(crate) fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Largest original label plus one.
    pub(crate) fn label_space(&self) -> usize {
        self.classes.last().map_or(0, |&max| max + 1)
    }
}
