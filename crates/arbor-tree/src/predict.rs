//! Tree traversal and accuracy scoring.

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::error::TreeError;
use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

impl DecisionTree {
    /// Predict the class label for a single sample.
    ///
    /// Traverses from the root: at each internal node, goes left when
    /// `sample[feature] <= threshold`, right otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict_one(&self, sample: &[f64]) -> Result<usize, TreeError> {
        if sample.len() != self.n_features {
            return Err(TreeError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }
        Ok(self.traverse(sample))
    }

    /// Predict class labels for a batch of samples in parallel.
    ///
    /// The output is aligned with `features`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] if any sample has the wrong feature count.
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>, TreeError> {
        features
            .par_iter()
            .map(|sample| self.predict_one(sample))
            .collect()
    }

    /// Return the fraction of samples whose prediction equals the label.
    ///
    /// An empty batch scores `0.0`.
    ///
    /// # Errors
    ///
    /// | Variant                                  | When                              |
    /// |------------------------------------------|-----------------------------------|
    /// | [`TreeError::LabelCountMismatch`]        | `labels.len() != features.len()`  |
    /// | [`TreeError::PredictionFeatureMismatch`] | any sample has the wrong length   |
    pub fn score(&self, features: &[Vec<f64>], labels: &[usize]) -> Result<f64, TreeError> {
        if features.len() != labels.len() {
            return Err(TreeError::LabelCountMismatch {
                n_samples: features.len(),
                n_labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Ok(0.0);
        }
        let predictions = self.predict(features)?;
        let correct = predictions
            .par_iter()
            .zip(labels.par_iter())
            .filter(|&(p, l)| p == l)
            .count();
        Ok(correct as f64 / labels.len() as f64)
    }

    /// Walk from the root and return the class of the leaf reached.
    fn traverse(&self, sample: &[f64]) -> usize {
        let mut idx = NodeIndex::ROOT;
        loop {
            match self.node(idx) {
                Node::Leaf { value, .. } => return *value,
                Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if sample[feature.index()] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}
