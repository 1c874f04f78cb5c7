//! Deterministic synthetic classification datasets.

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::DataError;

/// Parameters for [`make_classification`].
///
/// # Defaults
///
/// | Parameter       | Default |
/// |-----------------|---------|
/// | `n_features`    | 4       |
/// | `n_informative` | 2       |
/// | `n_classes`     | 3       |
/// | `class_sep`     | 2.0     |
/// | `noise`         | 1.5     |
/// | `seed`          | 42      |
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub(crate) n_samples: usize,
    pub(crate) n_features: usize,
    pub(crate) n_informative: usize,
    pub(crate) n_classes: usize,
    pub(crate) class_sep: f64,
    pub(crate) noise: f64,
    pub(crate) seed: u64,
}

impl SyntheticConfig {
    /// Create a config for `n_samples` samples with default shape.
    #[must_use]
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            n_features: 4,
            n_informative: 2,
            n_classes: 3,
            class_sep: 2.0,
            noise: 1.5,
            seed: 42,
        }
    }

    /// Set the total number of feature columns.
    #[must_use]
    pub fn with_n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }

    /// Set how many leading feature columns depend on the class.
    #[must_use]
    pub fn with_n_informative(mut self, n_informative: usize) -> Self {
        self.n_informative = n_informative;
        self
    }

    /// Set the number of classes.
    #[must_use]
    pub fn with_n_classes(mut self, n_classes: usize) -> Self {
        self.n_classes = n_classes;
        self
    }

    /// Set the distance between neighbouring class centres.
    #[must_use]
    pub fn with_class_sep(mut self, class_sep: f64) -> Self {
        self.class_sep = class_sep;
        self
    }

    /// Set the width of the uniform noise added to every value.
    #[must_use]
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.n_samples == 0 {
            return Err(DataError::InvalidSampleCount {
                n_samples: self.n_samples,
            });
        }
        if self.n_classes < 2 {
            return Err(DataError::InvalidClassCount {
                n_classes: self.n_classes,
            });
        }
        if self.n_informative == 0 || self.n_informative > self.n_features {
            return Err(DataError::InvalidInformativeCount {
                n_informative: self.n_informative,
                n_features: self.n_features,
            });
        }
        if !(self.class_sep.is_finite() && self.class_sep > 0.0) {
            return Err(DataError::InvalidClassSeparation {
                class_sep: self.class_sep,
            });
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(DataError::InvalidNoise { noise: self.noise });
        }
        Ok(())
    }
}

/// Generate a labelled dataset with `n_informative` class-dependent columns.
///
/// Classes are assigned round-robin and the rows shuffled. Informative
/// feature `f` places class `c` at `((c + f) % n_classes) * class_sep`, so
/// each informative column orders the classes differently; every value then
/// gets uniform noise in `[0, noise)`. The remaining columns are pure noise.
///
/// # Errors
///
/// | Variant                                | When                                 |
/// |----------------------------------------|--------------------------------------|
/// | [`DataError::InvalidSampleCount`]      | `n_samples` is zero                  |
/// | [`DataError::InvalidClassCount`]       | `n_classes` < 2                      |
/// | [`DataError::InvalidInformativeCount`] | `n_informative` not in [1, features] |
/// | [`DataError::InvalidClassSeparation`]  | `class_sep` not positive and finite  |
/// | [`DataError::InvalidNoise`]            | `noise` negative or not finite       |
pub fn make_classification(
    config: &SyntheticConfig,
) -> Result<(Vec<Vec<f64>>, Vec<usize>), DataError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut order: Vec<usize> = (0..config.n_samples).collect();
    order.shuffle(&mut rng);

    let mut features = Vec::with_capacity(config.n_samples);
    let mut labels = Vec::with_capacity(config.n_samples);
    for i in order {
        let class = i % config.n_classes;
        labels.push(class);
        let row: Vec<f64> = (0..config.n_features)
            .map(|f| {
                let centre = if f < config.n_informative {
                    ((class + f) % config.n_classes) as f64 * config.class_sep
                } else {
                    0.0
                };
                centre + rng.r#gen::<f64>() * config.noise
            })
            .collect();
        features.push(row);
    }

    debug!(
        n_samples = config.n_samples,
        n_features = config.n_features,
        n_classes = config.n_classes,
        "generated synthetic classification data"
    );

    Ok((features, labels))
}

/// Generate points in the unit square labelled by quadrant XOR.
///
/// Label is 1 when exactly one coordinate exceeds 0.5. A tree needs two
/// levels of splits to separate it.
///
/// # Errors
///
/// Returns [`DataError::InvalidSampleCount`] when `n_samples` is zero.
pub fn make_xor(n_samples: usize, seed: u64) -> Result<(Vec<Vec<f64>>, Vec<usize>), DataError> {
    if n_samples == 0 {
        return Err(DataError::InvalidSampleCount { n_samples });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let features: Vec<Vec<f64>> = (0..n_samples)
        .map(|_| vec![rng.r#gen::<f64>(), rng.r#gen::<f64>()])
        .collect();
    let labels = features
        .iter()
        .map(|p| usize::from((p[0] > 0.5) != (p[1] > 0.5)))
        .collect();
    Ok((features, labels))
}
