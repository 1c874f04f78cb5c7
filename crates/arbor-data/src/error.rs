//! Error types for arbor-data.

/// Errors from dataset generation and splitting.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Returned when a generator is asked for zero samples.
    #[error("n_samples must be at least 1, got {n_samples}")]
    InvalidSampleCount {
        /// The invalid sample count provided.
        n_samples: usize,
    },

    /// Returned when fewer than two classes are requested.
    #[error("n_classes must be at least 2, got {n_classes}")]
    InvalidClassCount {
        /// The invalid class count provided.
        n_classes: usize,
    },

    /// Returned when the informative feature count is zero or exceeds the total.
    #[error("n_informative must be in [1, {n_features}], got {n_informative}")]
    InvalidInformativeCount {
        /// The requested number of informative features.
        n_informative: usize,
        /// The total number of features.
        n_features: usize,
    },

    /// Returned when the class separation is not a positive finite number.
    #[error("class_sep must be positive and finite, got {class_sep}")]
    InvalidClassSeparation {
        /// The invalid separation provided.
        class_sep: f64,
    },

    /// Returned when the noise width is negative or not finite.
    #[error("noise must be non-negative and finite, got {noise}")]
    InvalidNoise {
        /// The invalid noise width provided.
        noise: f64,
    },

    /// Returned when the test fraction is not in (0.0, 1.0).
    #[error("test_fraction must be in (0.0, 1.0), got {fraction}")]
    InvalidTestFraction {
        /// The invalid fraction provided.
        fraction: f64,
    },

    /// Returned when features and labels have different lengths.
    #[error("got {n_labels} labels for {n_samples} samples")]
    LengthMismatch {
        /// Number of feature rows.
        n_samples: usize,
        /// Number of labels.
        n_labels: usize,
    },

    /// Returned when a split would leave the train or test side empty.
    #[error("cannot split {n_samples} samples with test_fraction {fraction}: one side would be empty")]
    SplitTooSmall {
        /// Number of samples available.
        n_samples: usize,
        /// The requested test fraction.
        fraction: f64,
    },
}
