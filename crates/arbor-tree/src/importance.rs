//! Mean-decrease-in-impurity feature importance.

use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

/// A ranked feature with name, importance score, and rank.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedFeature {
    /// Feature name.
    pub name: String,
    /// Normalized importance score.
    pub importance: f64,
    /// 1-based rank (1 = most important).
    pub rank: usize,
}

impl DecisionTree {
    /// Compute normalized impurity-decrease importances, one per feature.
    ///
    /// Each internal node contributes
    /// `samples / total * (impurity - w_l * left.impurity - w_r * right.impurity)`
    /// to its feature, with child weights relative to the node's own sample
    /// count. The totals are scaled to sum to 1.0; a tree without splits
    /// yields all zeros.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.n_features];
        self.accumulate(NodeIndex::ROOT, self.n_samples as f64, &mut totals);

        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        }
        totals
    }

    fn accumulate(&self, idx: NodeIndex, total_samples: f64, totals: &mut [f64]) {
        let Node::Internal {
            feature,
            left,
            right,
            samples,
            impurity,
            ..
        } = self.node(idx)
        else {
            return;
        };

        let (left_node, right_node) = (self.node(*left), self.node(*right));
        let n = *samples as f64;
        let left_weight = left_node.samples() as f64 / n;
        let right_weight = right_node.samples() as f64 / n;
        let decrease = impurity.value()
            - left_weight * left_node.impurity().value()
            - right_weight * right_node.impurity().value();
        totals[feature.index()] += n / total_samples * decrease;

        self.accumulate(*left, total_samples, totals);
        self.accumulate(*right, total_samples, totals);
    }
}

/// Pair importances with names, sort descending and assign 1-based ranks.
///
/// Equal importances keep their original feature order.
#[must_use]
pub fn rank_features(importances: &[f64], names: &[String]) -> Vec<RankedFeature> {
    let mut features: Vec<RankedFeature> = names
        .iter()
        .zip(importances)
        .map(|(name, &importance)| RankedFeature {
            name: name.clone(),
            importance,
            rank: 0,
        })
        .collect();

    features.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    for (i, feat) in features.iter_mut().enumerate() {
        feat.rank = i + 1;
    }

    features
}
