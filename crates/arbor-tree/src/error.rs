/// Broad category of a [`TreeError`].
///
/// Every error variant belongs to exactly one category, so callers that only
/// care about the class of failure can match on [`TreeError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An invalid hyperparameter, reported when the model is constructed.
    Configuration,
    /// Inputs whose dimensions disagree with each other or with the fitted model.
    ShapeMismatch,
    /// Prediction or introspection requested before a successful `fit`.
    NotFitted,
    /// Labels that cannot be bucketed into a small contiguous class range.
    InvalidLabel,
}

/// Errors from decision tree construction, fitting and prediction.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when a criterion name is neither `gini` nor `entropy`.
    #[error("unknown split criterion {name:?}, expected \"gini\" or \"entropy\"")]
    UnknownCriterion {
        /// The unrecognized criterion name.
        name: String,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: usize,
    },

    /// Returned when min_samples_split is less than 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit {
        /// The invalid min_samples_split value provided.
        min_samples_split: usize,
    },

    /// Returned when min_samples_leaf is zero.
    #[error("min_samples_leaf must be at least 1, got {min_samples_leaf}")]
    InvalidMinSamplesLeaf {
        /// The invalid min_samples_leaf value provided.
        min_samples_leaf: usize,
    },

    /// Returned when the training dataset has zero samples.
    #[error("training dataset has zero samples")]
    EmptyDataset,

    /// Returned when the training dataset has zero feature columns.
    #[error("training dataset has zero feature columns")]
    ZeroFeatures,

    /// Returned when a training row has a different length than the first row.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    RaggedRow {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the sample.
        got: usize,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when the label vector is not aligned with the sample matrix.
    #[error("got {n_labels} labels for {n_samples} samples")]
    LabelCountMismatch {
        /// Number of rows in the sample matrix.
        n_samples: usize,
        /// Number of entries in the label vector.
        n_labels: usize,
    },

    /// Returned when a sample has a different number of features at prediction time.
    #[error("prediction input has {got} features, expected {expected}")]
    PredictionFeatureMismatch {
        /// The number of features the model was fitted on.
        expected: usize,
        /// The actual number of features in the prediction input.
        got: usize,
    },

    /// Returned when the number of feature names differs from the feature count.
    #[error("got {got} feature names for {expected} features")]
    FeatureNameCountMismatch {
        /// The number of feature columns in the training data.
        expected: usize,
        /// The number of names supplied.
        got: usize,
    },

    /// Returned when a training value is NaN or infinite.
    #[error("non-finite value at sample {sample_index}, feature {feature_index}")]
    NonFiniteValue {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The zero-based index of the offending feature column.
        feature_index: usize,
    },

    /// Returned when `predict`, `score` or introspection runs before `fit`.
    #[error("model is not fitted, call fit before using it")]
    NotFitted,

    /// Returned when a label cannot be used as a class bucket index.
    #[error("invalid label at sample {sample_index}: {reason}")]
    InvalidLabel {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl TreeError {
    /// Return the broad category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::UnknownCriterion { .. }
            | TreeError::InvalidMaxDepth { .. }
            | TreeError::InvalidMinSamplesSplit { .. }
            | TreeError::InvalidMinSamplesLeaf { .. } => ErrorKind::Configuration,
            TreeError::EmptyDataset
            | TreeError::ZeroFeatures
            | TreeError::RaggedRow { .. }
            | TreeError::LabelCountMismatch { .. }
            | TreeError::PredictionFeatureMismatch { .. }
            | TreeError::FeatureNameCountMismatch { .. }
            | TreeError::NonFiniteValue { .. } => ErrorKind::ShapeMismatch,
            TreeError::NotFitted => ErrorKind::NotFitted,
            TreeError::InvalidLabel { .. } => ErrorKind::InvalidLabel,
        }
    }
}
