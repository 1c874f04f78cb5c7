//! Hyperparameters for decision tree induction.

use crate::criterion::SplitCriterion;
use crate::error::TreeError;

/// Configuration for a single CART decision tree.
///
/// Construct via [`TreeConfig::new`], then chain `with_*` methods. The
/// values are checked by [`TreeConfig::validate`], which
/// [`DecisionTreeClassifier::new`](crate::DecisionTreeClassifier::new) calls.
///
/// # Defaults
///
/// | Parameter           | Default |
/// |---------------------|---------|
/// | `max_depth`         | 10      |
/// | `min_samples_split` | 2       |
/// | `min_samples_leaf`  | 1       |
/// | `criterion`         | `Gini`  |
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TreeConfig {
    pub(crate) max_depth: usize,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
    pub(crate) criterion: SplitCriterion,
}

impl TreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            criterion: SplitCriterion::Gini,
        }
    }

    /// Set the maximum tree depth.
    ///
    /// The root sits at depth 0 and a node at depth `max_depth` always
    /// becomes a leaf, so the tree has at most `max_depth` levels of splits.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples required to attempt a split.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    /// Set the minimum number of samples required in each child of a split.
    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Set the impurity criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: SplitCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    // --- Getters ---

    /// Return the maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return the minimum samples required to split a node.
    #[must_use]
    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    /// Return the minimum samples required in each leaf.
    #[must_use]
    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    /// Return the impurity criterion.
    #[must_use]
    pub fn criterion(&self) -> SplitCriterion {
        self.criterion
    }

    /// Check every hyperparameter.
    ///
    /// # Errors
    ///
    /// | Variant                                | When                       |
    /// |----------------------------------------|----------------------------|
    /// | [`TreeError::InvalidMaxDepth`]         | `max_depth` is 0           |
    /// | [`TreeError::InvalidMinSamplesSplit`]  | `min_samples_split` < 2    |
    /// | [`TreeError::InvalidMinSamplesLeaf`]   | `min_samples_leaf` < 1     |
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.max_depth == 0 {
            return Err(TreeError::InvalidMaxDepth { max_depth: 0 });
        }
        if self.min_samples_split < 2 {
            return Err(TreeError::InvalidMinSamplesSplit {
                min_samples_split: self.min_samples_split,
            });
        }
        if self.min_samples_leaf < 1 {
            return Err(TreeError::InvalidMinSamplesLeaf {
                min_samples_leaf: self.min_samples_leaf,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
