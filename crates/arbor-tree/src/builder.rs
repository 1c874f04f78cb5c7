//! Recursive partitioning into an arena of nodes.

use tracing::trace;

use crate::config::TreeConfig;
use crate::criterion::{class_counts, majority_class};
use crate::dataset::ColumnarDataset;
use crate::node::{Impurity, Node, NodeIndex};
use crate::split::find_best_split;

/// Why a node was turned into a leaf, in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    MaxDepth,
    Pure,
    TooFewToSplit,
    NoGain,
    LeafTooSmall,
}

/// Grows one tree over a validated dataset.
///
/// Nodes are laid out in pre-order: a parent reserves its slot before its
/// children are built, so the root is always at index 0.
pub(crate) struct TreeBuilder<'a> {
    config: &'a TreeConfig,
    data: &'a ColumnarDataset,
    arena: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(config: &'a TreeConfig, data: &'a ColumnarDataset) -> Self {
        Self {
            config,
            data,
            arena: Vec::new(),
        }
    }

    /// Build the whole tree from every sample and return the node arena.
    pub(crate) fn build(mut self) -> Vec<Node> {
        let sample_indices: Vec<usize> = (0..self.data.n_samples()).collect();
        self.build_node(&sample_indices, 0);
        self.arena
    }

    fn build_node(&mut self, sample_indices: &[usize], depth: usize) -> NodeIndex {
        let n_samples = sample_indices.len();
        let counts = class_counts(
            sample_indices.iter().map(|&si| self.data.labels[si]),
            self.data.n_classes(),
        );
        let impurity = self.config.criterion.impurity(&counts, n_samples);

        let distinct_labels = counts.iter().filter(|&&c| c > 0).count();
        let stop = if depth >= self.config.max_depth {
            Some(StopReason::MaxDepth)
        } else if distinct_labels == 1 {
            Some(StopReason::Pure)
        } else if n_samples < self.config.min_samples_split {
            Some(StopReason::TooFewToSplit)
        } else {
            None
        };
        if let Some(reason) = stop {
            return self.push_leaf(&counts, n_samples, impurity, depth, reason);
        }

        let candidate = match find_best_split(self.data, sample_indices, self.config.criterion) {
            Some(c) if c.split.gain > 0.0 => c,
            _ => return self.push_leaf(&counts, n_samples, impurity, depth, StopReason::NoGain),
        };

        let min_leaf = self.config.min_samples_leaf;
        if candidate.left_indices.len() < min_leaf || candidate.right_indices.len() < min_leaf {
            return self.push_leaf(&counts, n_samples, impurity, depth, StopReason::LeafTooSmall);
        }

        // Reserve the parent slot so children land after it.
        let node_idx = self.arena.len();
        self.arena.push(Node::Leaf {
            value: 0,
            samples: n_samples,
            impurity,
        });

        let left = self.build_node(&candidate.left_indices, depth + 1);
        let right = self.build_node(&candidate.right_indices, depth + 1);

        self.arena[node_idx] = Node::Internal {
            feature: candidate.split.feature,
            threshold: candidate.split.threshold,
            left,
            right,
            samples: n_samples,
            impurity,
        };

        NodeIndex::new(node_idx)
    }

    fn push_leaf(
        &mut self,
        counts: &[usize],
        n_samples: usize,
        impurity: Impurity,
        depth: usize,
        reason: StopReason,
    ) -> NodeIndex {
        let value = self.data.classes[majority_class(counts)];
        trace!(depth, n_samples, value, ?reason, "leaf");
        let idx = self.arena.len();
        self.arena.push(Node::Leaf {
            value,
            samples: n_samples,
            impurity,
        });
        NodeIndex::new(idx)
    }
}
