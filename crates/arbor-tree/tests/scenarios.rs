//! End-to-end behaviour of the classifier on small hand-built datasets.

use arbor_tree::{
    DecisionTreeClassifier, ErrorKind, MAX_CLASSES, Node, SplitCriterion, TreeConfig, TreeError,
    TreeRenderer,
};

fn column(values: &[f64]) -> Vec<Vec<f64>> {
    values.iter().map(|&v| vec![v]).collect()
}

#[test]
fn one_split_separates_two_classes() {
    let features = column(&[0.0, 1.0, 2.0, 3.0]);
    let labels = [0, 0, 1, 1];
    let mut model = DecisionTreeClassifier::new(TreeConfig::new().with_max_depth(1)).unwrap();
    model.fit(&features, &labels).unwrap();

    let tree = model.tree().unwrap();
    let Node::Internal {
        feature,
        threshold,
        left,
        right,
        ..
    } = tree.root()
    else {
        panic!("root should be internal");
    };
    assert_eq!(feature.index(), 0);
    assert_eq!(*threshold, 1.0);
    assert!(matches!(tree.node(*left), Node::Leaf { value: 0, .. }));
    assert!(matches!(tree.node(*right), Node::Leaf { value: 1, .. }));

    let info = model.tree_info().unwrap();
    assert_eq!((info.depth, info.nodes, info.leaves), (2, 3, 2));
    assert!((model.score(&features, &labels).unwrap() - 1.0).abs() < f64::EPSILON);
    assert_eq!(model.feature_importances().unwrap(), &[1.0]);
}

#[test]
fn identical_labels_give_a_single_leaf() {
    let features = vec![
        vec![0.3, 7.0],
        vec![1.5, -2.0],
        vec![9.0, 4.0],
        vec![2.2, 0.0],
    ];
    let mut model = DecisionTreeClassifier::new(TreeConfig::new()).unwrap();
    model.fit(&features, &[1, 1, 1, 1]).unwrap();

    let tree = model.tree().unwrap();
    assert!(matches!(tree.root(), Node::Leaf { value: 1, samples: 4, .. }));
    assert_eq!(tree.root().impurity().value(), 0.0);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.depth(), 1);
    assert_eq!(model.feature_importances().unwrap(), &[0.0, 0.0]);
}

#[test]
fn min_samples_split_above_dataset_size_gives_a_leaf() {
    let features = column(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    for criterion in [SplitCriterion::Gini, SplitCriterion::Entropy] {
        let config = TreeConfig::new()
            .with_min_samples_split(6)
            .with_criterion(criterion);
        let mut model = DecisionTreeClassifier::new(config).unwrap();
        model.fit(&features, &[0, 1, 2, 1, 0]).unwrap();
        let info = model.tree_info().unwrap();
        assert_eq!(info.nodes, 1, "{criterion}");
        assert!(model.tree().unwrap().root().is_leaf());
    }
}

#[test]
fn predicting_with_fewer_features_is_a_shape_error() {
    let features = vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
    ];
    let mut model = DecisionTreeClassifier::new(TreeConfig::new()).unwrap();
    model.fit(&features, &[0, 0, 1]).unwrap();

    let err = model.predict(&[vec![0.0, 1.0, 2.0]]).unwrap_err();
    assert!(matches!(
        err,
        TreeError::PredictionFeatureMismatch { expected: 4, got: 3 }
    ));
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn criterion_names_parse_at_the_boundary() {
    let criterion: SplitCriterion = "entropy".parse().unwrap();
    let model = DecisionTreeClassifier::new(TreeConfig::new().with_criterion(criterion)).unwrap();
    assert_eq!(model.config().criterion(), SplitCriterion::Entropy);

    let err = "variance".parse::<SplitCriterion>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn rendered_tree_lists_every_node() {
    let features = column(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new())
        .unwrap()
        .with_feature_names(vec!["length".into()])
        .with_class_names(vec!["small".into(), "medium".into(), "large".into()]);
    model.fit(&features, &[0, 0, 1, 1, 2, 2]).unwrap();

    let tree = model.tree().unwrap();
    let text = TreeRenderer::new(tree)
        .with_feature_names(model.feature_names().unwrap())
        .with_class_names(model.class_names().unwrap())
        .to_string();
    assert_eq!(text.lines().count(), tree.node_count());
    assert!(text.contains("class large"));
    assert!(text.starts_with("length <= "));
}

#[test]
fn sparse_labels_are_predicted_with_their_original_values() {
    let features = column(&[0.0, 1.0, 2.0, 3.0]);
    let labels = [0, 0, MAX_CLASSES - 1, MAX_CLASSES - 1];
    let mut model = DecisionTreeClassifier::new(TreeConfig::new()).unwrap();
    model.fit(&features, &labels).unwrap();

    assert_eq!(model.n_classes().unwrap(), MAX_CLASSES);
    assert_eq!(model.predict(&features).unwrap(), labels.to_vec());
    let tree = model.tree().unwrap();
    assert_eq!(tree.node_count(), 3);
    assert!((tree.root().impurity().value() - 0.5).abs() < 1e-12);
}

#[test]
fn out_of_range_label_is_rejected_at_fit() {
    let features = column(&[0.0, 1.0, 2.0]);
    let mut model = DecisionTreeClassifier::new(TreeConfig::new()).unwrap();
    let err = model.fit(&features, &[0, MAX_CLASSES, 1]).unwrap_err();
    assert!(matches!(err, TreeError::InvalidLabel { sample_index: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidLabel);
    assert!(!model.is_fitted());
}

#[test]
fn zero_gain_everywhere_gives_a_single_leaf() {
    // Each distinct value carries one sample of each class.
    let n = 132;
    let features: Vec<Vec<f64>> = (0..n).map(|i| vec![(i / 3) as f64]).collect();
    let labels: Vec<usize> = (0..n).map(|i| [0, 1, 2, 2, 1, 0][i % 6]).collect();
    for criterion in [SplitCriterion::Gini, SplitCriterion::Entropy] {
        let mut model =
            DecisionTreeClassifier::new(TreeConfig::new().with_criterion(criterion)).unwrap();
        model.fit(&features, &labels).unwrap();
        let info = model.tree_info().unwrap();
        assert_eq!((info.depth, info.nodes, info.leaves), (1, 1, 1), "{criterion}");
        assert_eq!(model.feature_importances().unwrap(), &[0.0]);
    }
}
