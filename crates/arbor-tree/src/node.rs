use std::fmt;

/// Zero-based feature column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    /// Create a new feature index from a zero-based column position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based feature column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a node inside a [`DecisionTree`](crate::DecisionTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The root always occupies the first arena slot.
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Criterion-agnostic impurity value (Gini or Entropy).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
pub struct Impurity(f64);

impl Impurity {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw impurity value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Impurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A node in a decision tree arena.
///
/// Each `Internal` node owns its two children through the arena: every
/// index other than the root is referenced by exactly one parent, so the
/// structure is a strict binary tree with no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Node {
    /// A node that thresholds a single feature.
    Internal {
        /// Feature used for the split.
        feature: FeatureIndex,
        /// Samples with `x[feature] <= threshold` go left.
        threshold: f64,
        /// Index of the left child node.
        left: NodeIndex,
        /// Index of the right child node.
        right: NodeIndex,
        /// Number of training samples that reached this node.
        samples: usize,
        /// Impurity of those samples before splitting.
        impurity: Impurity,
    },
    /// A terminal node predicting a class.
    Leaf {
        /// Predicted class (majority label, lowest label on ties).
        value: usize,
        /// Number of training samples that reached this leaf.
        samples: usize,
        /// Impurity of those samples.
        impurity: Impurity,
    },
}

impl Node {
    /// Return the impurity at this node (before splitting for internal nodes).
    #[must_use]
    pub fn impurity(&self) -> Impurity {
        match self {
            Node::Internal { impurity, .. } | Node::Leaf { impurity, .. } => *impurity,
        }
    }

    /// Return the number of training samples that reached this node.
    #[must_use]
    pub fn samples(&self) -> usize {
        match self {
            Node::Internal { samples, .. } | Node::Leaf { samples, .. } => *samples,
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the child indices of an internal node, `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match self {
            Node::Internal { left, right, .. } => Some((*left, *right)),
            Node::Leaf { .. } => None,
        }
    }
}
