//! Read-only structural statistics of a fitted tree.

use crate::node::{Node, NodeIndex};
use crate::tree::DecisionTree;

/// Summary of a tree's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TreeInfo {
    /// Number of node levels; a lone leaf has depth 1.
    pub depth: usize,
    /// Total number of nodes, internal and leaf.
    pub nodes: usize,
    /// Number of leaves.
    pub leaves: usize,
}

impl DecisionTree {
    /// Return the number of node levels on the longest root-to-leaf path.
    ///
    /// A single-leaf tree has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth_from(NodeIndex::ROOT)
    }

    /// Return the total number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.count_from(NodeIndex::ROOT, &|_| true)
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.count_from(NodeIndex::ROOT, &Node::is_leaf)
    }

    /// Return depth, node count and leaf count together.
    #[must_use]
    pub fn info(&self) -> TreeInfo {
        TreeInfo {
            depth: self.depth(),
            nodes: self.node_count(),
            leaves: self.leaf_count(),
        }
    }

    fn depth_from(&self, idx: NodeIndex) -> usize {
        match self.node(idx).children() {
            None => 1,
            Some((left, right)) => 1 + self.depth_from(left).max(self.depth_from(right)),
        }
    }

    fn count_from(&self, idx: NodeIndex, include: &impl Fn(&Node) -> bool) -> usize {
        let node = self.node(idx);
        let own = usize::from(include(node));
        match node.children() {
            None => own,
            Some((left, right)) => {
                own + self.count_from(left, include) + self.count_from(right, include)
            }
        }
    }
}
