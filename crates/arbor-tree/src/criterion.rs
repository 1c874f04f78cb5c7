//! Impurity measures used to score candidate splits.

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;
use crate::node::Impurity;

/// Criterion for measuring the heterogeneity of a set of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum SplitCriterion {
    /// Gini impurity: 1 - Σ(p_i²)
    #[default]
    Gini,
    /// Information entropy in bits: -Σ(p_i · log2(p_i))
    Entropy,
}

impl SplitCriterion {
    /// Compute the impurity of a node from its class counts.
    ///
    /// Returns `0.0` when `n_samples` is zero. Classes with a zero count
    /// contribute nothing; for `Entropy` they are skipped rather than clamped.
    #[must_use]
    pub fn impurity(&self, class_counts: &[usize], n_samples: usize) -> Impurity {
        if n_samples == 0 {
            return Impurity::new(0.0);
        }
        let n = n_samples as f64;
        let value = match self {
            SplitCriterion::Gini => {
                let sum_sq: f64 = class_counts
                    .iter()
                    .map(|&c| {
                        let p = c as f64 / n;
                        p * p
                    })
                    .sum();
                1.0 - sum_sq
            }
            SplitCriterion::Entropy => -class_counts
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| {
                    let p = c as f64 / n;
                    p * p.log2()
                })
                .sum::<f64>(),
        };
        // A pure node yields -0.0 for entropy.
        Impurity::new(if value <= 0.0 { 0.0 } else { value })
    }

    /// Compute the impurity of a label set directly.
    ///
    /// Labels must be smaller than `n_classes`.
    #[must_use]
    pub fn impurity_of_labels(&self, labels: &[usize], n_classes: usize) -> Impurity {
        self.impurity(&class_counts(labels.iter().copied(), n_classes), labels.len())
    }

    /// Return the lower-case name accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SplitCriterion::Gini => "gini",
            SplitCriterion::Entropy => "entropy",
        }
    }
}

impl fmt::Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplitCriterion {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gini" => Ok(SplitCriterion::Gini),
            "entropy" => Ok(SplitCriterion::Entropy),
            _ => Err(TreeError::UnknownCriterion { name: s.to_string() }),
        }
    }
}

/// Bucket labels by value into a vector of length `n_classes`.
pub(crate) fn class_counts(labels: impl Iterator<Item = usize>, n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for label in labels {
        counts[label] += 1;
    }
    counts
}

/// Most frequent class in `counts`; the lowest label wins on ties.
pub(crate) fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}
