//! Binary decision-tree classification: fit, predict, explain.
//!
//! Provides a hand-rolled CART classifier that thresholds one numeric
//! feature per internal node, with Gini/Entropy criteria, exhaustive
//! best-split search, impurity-decrease feature importance, and read-only
//! structural introspection.

mod builder;
mod config;
mod criterion;
mod dataset;
mod error;
mod importance;
mod introspect;
mod labels;
mod model;
mod node;
mod predict;
mod render;
mod split;
mod tree;

pub use config::TreeConfig;
pub use criterion::SplitCriterion;
pub use dataset::MAX_CLASSES;
pub use error::{ErrorKind, TreeError};
pub use importance::{RankedFeature, rank_features};
pub use introspect::TreeInfo;
pub use labels::LabelEncoder;
pub use model::DecisionTreeClassifier;
pub use node::{FeatureIndex, Impurity, Node, NodeIndex};
pub use render::TreeRenderer;
pub use split::{BestSplit, best_split};
pub use tree::DecisionTree;
