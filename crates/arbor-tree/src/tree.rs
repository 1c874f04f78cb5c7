use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::config::TreeConfig;
use crate::dataset::ColumnarDataset;
use crate::error::TreeError;
use crate::node::{Node, NodeIndex};

/// A fitted CART decision tree.
///
/// Stored as an arena-based `Vec<Node>` in pre-order with the root at
/// index 0. A tree is immutable once built.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) n_features: usize,
    pub(crate) n_classes: usize,
    pub(crate) n_samples: usize,
}

impl DecisionTree {
    /// Validate the inputs and grow a tree.
    ///
    /// `features[sample_idx][feature_idx]` is row-major; `labels[sample_idx]`
    /// are zero-based class ids.
    ///
    /// # Errors
    ///
    /// | Variant                                 | When                                   |
    /// |-----------------------------------------|----------------------------------------|
    /// | [`TreeError::InvalidMaxDepth`] etc.     | `config` fails [`TreeConfig::validate`] |
    /// | [`TreeError::EmptyDataset`]             | `features` is empty                    |
    /// | [`TreeError::LabelCountMismatch`]       | `labels.len() != features.len()`       |
    /// | [`TreeError::ZeroFeatures`]             | rows have zero feature columns         |
    /// | [`TreeError::RaggedRow`]                | rows have inconsistent lengths         |
    /// | [`TreeError::NonFiniteValue`]           | any value is NaN or infinite           |
    /// | [`TreeError::InvalidLabel`]             | a label is at least `MAX_CLASSES`      |
    #[instrument(skip_all, fields(n_samples = features.len(), criterion = %config.criterion))]
    pub fn fit(
        config: &TreeConfig,
        features: &[Vec<f64>],
        labels: &[usize],
    ) -> Result<Self, TreeError> {
        config.validate()?;
        let data = ColumnarDataset::from_rows(features, labels)?;

        debug!(
            n_samples = data.n_samples(),
            n_features = data.n_features(),
            n_classes = data.n_classes(),
            max_depth = config.max_depth,
            "fitting decision tree"
        );

        let nodes = TreeBuilder::new(config, &data).build();
        let tree = Self {
            nodes,
            n_features: data.n_features(),
            n_classes: data.label_space(),
            n_samples: data.n_samples(),
        };

        debug!(
            n_nodes = tree.nodes.len(),
            depth = tree.depth(),
            "decision tree built"
        );

        Ok(tree)
    }

    /// Return the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[NodeIndex::ROOT.index()]
    }

    /// Return the node stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` did not come from this tree.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()]
    }

    /// Return every node in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the number of features this tree was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the number of classes (largest training label plus one).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the number of training samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::SplitCriterion;

    #[test]
    fn invalid_config_is_reported_before_data() {
        let config = TreeConfig::new().with_max_depth(0);
        let err = DecisionTree::fit(&config, &[], &[]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidMaxDepth { .. }));
    }

    #[test]
    fn root_is_first_node() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let tree = DecisionTree::fit(&TreeConfig::new(), &features, &[0, 0, 1, 1]).unwrap();
        assert_eq!(tree.root(), &tree.nodes()[0]);
        assert_eq!(tree.root().samples(), 4);
        assert_eq!(tree.n_features(), 1);
        assert_eq!(tree.n_classes(), 2);
        assert_eq!(tree.n_samples(), 4);
    }

    #[test]
    fn children_reference_later_slots() {
        let features: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![f64::from(i), f64::from(i % 3)])
            .collect();
        let labels: Vec<usize> = (0..12).map(|i| (i / 4) % 3).collect();
        let config = TreeConfig::new().with_criterion(SplitCriterion::Entropy);
        let tree = DecisionTree::fit(&config, &features, &labels).unwrap();
        for (idx, node) in tree.nodes().iter().enumerate() {
            if let Some((left, right)) = node.children() {
                assert!(left.index() > idx);
                assert!(right.index() > left.index());
                assert_eq!(
                    node.samples(),
                    tree.node(left).samples() + tree.node(right).samples()
                );
            }
        }
    }
}
