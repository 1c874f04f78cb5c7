//! Indented text rendering of a fitted tree.

use std::fmt;

use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

/// Renders a [`DecisionTree`] as an indented diagram.
///
/// Feature and class names are optional; missing names fall back to
/// `x[i]` and the numeric class id.
///
/// ```text
/// x[0] <= 1 (samples=4, impurity=0.500000)
///   class 0 (samples=2, impurity=0.000000)
///   class 1 (samples=2, impurity=0.000000)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    tree: &'a DecisionTree,
    feature_names: Option<&'a [String]>,
    class_names: Option<&'a [String]>,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer with numeric names.
    #[must_use]
    pub fn new(tree: &'a DecisionTree) -> Self {
        Self {
            tree,
            feature_names: None,
            class_names: None,
        }
    }

    /// Label internal nodes with these feature names.
    #[must_use]
    pub fn with_feature_names(mut self, names: &'a [String]) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Label leaves with these class names.
    #[must_use]
    pub fn with_class_names(mut self, names: &'a [String]) -> Self {
        self.class_names = Some(names);
        self
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, idx: NodeIndex, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        match self.tree.node(idx) {
            Node::Internal {
                feature,
                threshold,
                left,
                right,
                samples,
                impurity,
            } => {
                match self.feature_names.and_then(|n| n.get(feature.index())) {
                    Some(name) => write!(f, "{:pad$}{name}", "")?,
                    None => write!(f, "{:pad$}x[{feature}]", "")?,
                }
                writeln!(f, " <= {threshold} (samples={samples}, impurity={impurity})")?;
                self.write_node(f, *left, indent + 1)?;
                self.write_node(f, *right, indent + 1)
            }
            Node::Leaf {
                value,
                samples,
                impurity,
            } => {
                match self.class_names.and_then(|n| n.get(*value)) {
                    Some(name) => write!(f, "{:pad$}class {name}", "")?,
                    None => write!(f, "{:pad$}class {value}", "")?,
                }
                writeln!(f, " (samples={samples}, impurity={impurity})")
            }
        }
    }
}

impl fmt::Display for TreeRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, NodeIndex::ROOT, 0)
    }
}
