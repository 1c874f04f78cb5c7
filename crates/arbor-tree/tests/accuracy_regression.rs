//! Structural invariants and accuracy regression on a deterministic
//! synthetic dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arbor_tree::{DecisionTree, DecisionTreeClassifier, Node, SplitCriterion, TreeConfig};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic classification dataset
// ---------------------------------------------------------------------------

/// Generate a 300-sample, 8-feature, 3-class classification dataset.
///
/// Features 0-1 are informative (class * 2.0 + noise in [0, 1.5]), each one
/// enough to separate the classes. Features 2-7 are pure noise in [0, 1.5].
fn make_classification(seed: u64) -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n_samples = 300;
    let n_features = 8;
    let n_classes = 3;

    let mut features = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(class);
        let row: Vec<f64> = (0..n_features)
            .map(|f| {
                let base = if f < 2 { class as f64 * 2.0 } else { 0.0 };
                base + rng.r#gen::<f64>() * 1.5
            })
            .collect();
        features.push(row);
    }
    (features, labels)
}

fn configs() -> Vec<TreeConfig> {
    let mut out = Vec::new();
    for criterion in [SplitCriterion::Gini, SplitCriterion::Entropy] {
        for max_depth in [1, 2, 3, 5, 8] {
            for (min_split, min_leaf) in [(2, 1), (10, 4), (40, 15)] {
                out.push(
                    TreeConfig::new()
                        .with_criterion(criterion)
                        .with_max_depth(max_depth)
                        .with_min_samples_split(min_split)
                        .with_min_samples_leaf(min_leaf),
                );
            }
        }
    }
    out
}

#[test]
fn depth_never_exceeds_split_levels() {
    let (features, labels) = make_classification(7);
    for config in configs() {
        let tree = DecisionTree::fit(&config, &features, &labels).unwrap();
        assert!(
            tree.depth() <= config.max_depth() + 1,
            "depth {} with max_depth {}",
            tree.depth(),
            config.max_depth()
        );
    }
}

#[test]
fn importances_are_normalized() {
    let (features, labels) = make_classification(11);
    for config in configs() {
        let tree = DecisionTree::fit(&config, &features, &labels).unwrap();
        let importances = tree.feature_importances();
        assert_eq!(importances.len(), 8);
        assert!(importances.iter().all(|&v| (0.0..=1.0).contains(&v)));
        let sum: f64 = importances.iter().sum();
        if tree.node_count() > 1 {
            assert!((sum - 1.0).abs() < 1e-9, "sum = {sum}");
        } else {
            assert_eq!(sum, 0.0);
        }
    }
}

#[test]
fn every_split_reduces_impurity_and_respects_leaf_size() {
    let (features, labels) = make_classification(3);
    for config in configs() {
        let tree = DecisionTree::fit(&config, &features, &labels).unwrap();
        for node in tree.nodes() {
            let Some((left, right)) = node.children() else {
                continue;
            };
            let (l, r) = (tree.node(left), tree.node(right));
            let n = node.samples() as f64;
            let weighted = l.samples() as f64 / n * l.impurity().value()
                + r.samples() as f64 / n * r.impurity().value();
            assert!(node.impurity().value() >= weighted);
            assert!(l.samples() >= config.min_samples_leaf());
            assert!(r.samples() >= config.min_samples_leaf());
            assert!(node.samples() >= config.min_samples_split());
        }
    }
}

#[test]
fn single_label_leaves_are_pure() {
    let (features, labels) = make_classification(5);
    let config = TreeConfig::new().with_max_depth(20);
    let tree = DecisionTree::fit(&config, &features, &labels).unwrap();
    let counts = leaf_label_sets(&tree, &features, &labels);
    for (node, distinct) in tree.nodes().iter().zip(counts) {
        if let Node::Leaf { impurity, .. } = node
            && distinct == 1
        {
            assert_eq!(impurity.value(), 0.0);
        }
    }
}

/// Number of distinct training labels reaching each arena slot (0 for internal nodes).
fn leaf_label_sets(tree: &DecisionTree, features: &[Vec<f64>], labels: &[usize]) -> Vec<usize> {
    let mut seen = vec![Vec::<usize>::new(); tree.nodes().len()];
    for (row, &label) in features.iter().zip(labels) {
        let mut idx = 0;
        while let Node::Internal {
            feature,
            threshold,
            left,
            right,
            ..
        } = &tree.nodes()[idx]
        {
            idx = if row[feature.index()] <= *threshold {
                left.index()
            } else {
                right.index()
            };
        }
        if !seen[idx].contains(&label) {
            seen[idx].push(label);
        }
    }
    seen.iter().map(Vec::len).collect()
}

#[test]
fn refitting_is_deterministic() {
    let (features, labels) = make_classification(42);
    let config = TreeConfig::new().with_criterion(SplitCriterion::Entropy);
    let first = DecisionTree::fit(&config, &features, &labels).unwrap();
    let second = DecisionTree::fit(&config, &features, &labels).unwrap();
    assert_eq!(first, second);
}

#[test]
fn repeated_prediction_is_idempotent() {
    let (features, labels) = make_classification(42);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new()).unwrap();
    model.fit(&features, &labels).unwrap();
    let a = model.predict(&features).unwrap();
    let b = model.predict(&features).unwrap();
    assert_eq!(a, b);
}

/// A deep tree must nearly memorize its training data.
///
/// Reference: every training sample is distinct, so unlimited growth reaches 1.0.
#[test]
fn deep_tree_fits_training_data() {
    let (features, labels) = make_classification(42);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new().with_max_depth(30)).unwrap();
    model.fit(&features, &labels).unwrap();
    let accuracy = model.score(&features, &labels).unwrap();
    assert!(accuracy > 0.99, "training accuracy {accuracy} <= 0.99");
}

/// Held-out accuracy must clearly beat the 1/3 chance level.
#[test]
fn generalizes_to_fresh_samples() {
    let (train_x, train_y) = make_classification(1);
    let (test_x, test_y) = make_classification(2);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new().with_max_depth(4)).unwrap();
    model.fit(&train_x, &train_y).unwrap();
    let accuracy = model.score(&test_x, &test_y).unwrap();
    assert!(accuracy > 0.75, "test accuracy {accuracy} <= 0.75");
}

/// The two informative features must carry most of the importance.
#[test]
fn top_features_are_informative() {
    let (features, labels) = make_classification(42);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new().with_max_depth(3)).unwrap();
    model.fit(&features, &labels).unwrap();

    let ranked = model.ranked_importances().unwrap();
    let top: Vec<&str> = ranked.iter().take(2).map(|f| f.name.as_str()).collect();
    assert!(top.contains(&"f0") || top.contains(&"f1"), "top-2: {top:?}");

    let importances = model.feature_importances().unwrap();
    assert!(importances[0] + importances[1] > 0.5, "{importances:?}");
}
