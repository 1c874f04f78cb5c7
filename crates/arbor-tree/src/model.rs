//! The fit/predict façade over a single decision tree.

use tracing::info;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::importance::{RankedFeature, rank_features};
use crate::introspect::TreeInfo;
use crate::tree::DecisionTree;

/// State recorded by a successful `fit`.
#[derive(Debug, Clone)]
struct Fitted {
    tree: DecisionTree,
    importances: Vec<f64>,
    feature_names: Vec<String>,
}

/// A CART classifier holding at most one fitted tree.
///
/// Hyperparameters are validated once in [`DecisionTreeClassifier::new`].
/// Each [`fit`](DecisionTreeClassifier::fit) builds a fresh tree and replaces
/// the previous one only after it is complete; a failed `fit` leaves the
/// previous model untouched. Reads take `&self` and may run concurrently.
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    config: TreeConfig,
    feature_names: Option<Vec<String>>,
    class_names: Option<Vec<String>>,
    fitted: Option<Fitted>,
}

impl DecisionTreeClassifier {
    /// Create an unfitted classifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails [`TreeConfig::validate`].
    pub fn new(config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self {
            config,
            feature_names: None,
            class_names: None,
            fitted: None,
        })
    }

    /// Attach feature names, checked against the feature count at `fit`.
    #[must_use]
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Attach class names. These are display metadata only.
    #[must_use]
    pub fn with_class_names(mut self, names: Vec<String>) -> Self {
        self.class_names = Some(names);
        self
    }

    /// Fit a new tree, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Every error of [`DecisionTree::fit`], plus
    /// [`TreeError::FeatureNameCountMismatch`] when the attached feature names
    /// do not match the number of columns.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), TreeError> {
        if let (Some(names), Some(first)) = (&self.feature_names, features.first())
            && names.len() != first.len()
        {
            return Err(TreeError::FeatureNameCountMismatch {
                expected: first.len(),
                got: names.len(),
            });
        }

        let tree = DecisionTree::fit(&self.config, features, labels)?;

        let feature_names = match &self.feature_names {
            Some(names) => names.clone(),
            None => (0..tree.n_features()).map(|f| format!("f{f}")).collect(),
        };

        let importances = tree.feature_importances();
        let info = tree.info();
        info!(
            depth = info.depth,
            nodes = info.nodes,
            leaves = info.leaves,
            "classifier fitted"
        );

        self.fitted = Some(Fitted {
            tree,
            importances,
            feature_names,
        });
        Ok(())
    }

    /// Predict one label per sample, in input order.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFitted`] before `fit`, or
    /// [`TreeError::PredictionFeatureMismatch`] for a sample of the wrong length.
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<usize>, TreeError> {
        self.tree()?.predict(features)
    }

    /// Predict the label of a single sample.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionTreeClassifier::predict`].
    pub fn predict_one(&self, sample: &[f64]) -> Result<usize, TreeError> {
        self.tree()?.predict_one(sample)
    }

    /// Return the accuracy of the predictions against `labels`.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFitted`], [`TreeError::LabelCountMismatch`] or
    /// [`TreeError::PredictionFeatureMismatch`].
    pub fn score(&self, features: &[Vec<f64>], labels: &[usize]) -> Result<f64, TreeError> {
        self.tree()?.score(features, labels)
    }

    /// Return depth, node count and leaf count of the fitted tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn tree_info(&self) -> Result<TreeInfo, TreeError> {
        Ok(self.tree()?.info())
    }

    /// Return the normalized importance of each feature.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn feature_importances(&self) -> Result<&[f64], TreeError> {
        Ok(&self.fitted()?.importances)
    }

    /// Return the features ranked by importance, most important first.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn ranked_importances(&self) -> Result<Vec<RankedFeature>, TreeError> {
        let fitted = self.fitted()?;
        Ok(rank_features(&fitted.importances, &fitted.feature_names))
    }

    /// Borrow the fitted tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn tree(&self) -> Result<&DecisionTree, TreeError> {
        Ok(&self.fitted()?.tree)
    }

    /// Return the number of features seen during `fit`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn n_features(&self) -> Result<usize, TreeError> {
        Ok(self.tree()?.n_features())
    }

    /// Return the number of classes seen during `fit`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFitted`] before `fit`.
    pub fn n_classes(&self) -> Result<usize, TreeError> {
        Ok(self.tree()?.n_classes())
    }

    /// Return `true` once a `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Return the hyperparameters.
    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Return the feature names used for the fitted tree, or the attached ones.
    #[must_use]
    pub fn feature_names(&self) -> Option<&[String]> {
        match &self.fitted {
            Some(fitted) => Some(&fitted.feature_names),
            None => self.feature_names.as_deref(),
        }
    }

    /// Return the attached class names.
    #[must_use]
    pub fn class_names(&self) -> Option<&[String]> {
        self.class_names.as_deref()
    }

    fn fitted(&self) -> Result<&Fitted, TreeError> {
        self.fitted.as_ref().ok_or(TreeError::NotFitted)
    }
}
