use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use arbor_data::{SyntheticConfig, TrainTestSplit, make_classification, make_xor, train_test_split};
use arbor_tree::{
    DecisionTreeClassifier, RankedFeature, SplitCriterion, TreeConfig, TreeInfo, TreeRenderer,
};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Fit and compare CART decision trees on synthetic data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for data generation and splitting
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for batch prediction (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shape of the generated dataset.
#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Dataset kind: "blobs" or "xor"
    #[arg(long, default_value = "blobs")]
    dataset: String,

    /// Number of samples to generate
    #[arg(long, default_value_t = 600)]
    n_samples: usize,

    /// Number of feature columns (blobs only)
    #[arg(long, default_value_t = 6)]
    n_features: usize,

    /// Number of class-dependent feature columns (blobs only)
    #[arg(long, default_value_t = 2)]
    n_informative: usize,

    /// Number of classes (blobs only)
    #[arg(long, default_value_t = 3)]
    n_classes: usize,

    /// Distance between neighbouring class centres (blobs only)
    #[arg(long, default_value_t = 1.0)]
    class_sep: f64,

    /// Width of the uniform noise added to every value (blobs only)
    #[arg(long, default_value_t = 1.5)]
    noise: f64,

    /// Fraction of samples held out for testing
    #[arg(long, default_value_t = 0.3)]
    test_fraction: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Train a single tree and report accuracy, structure and importances
    Fit {
        /// Maximum tree depth
        #[arg(long, default_value_t = 10)]
        max_depth: usize,

        /// Minimum samples required to split a node
        #[arg(long, default_value_t = 2)]
        min_samples_split: usize,

        /// Minimum samples required in each child of a split
        #[arg(long, default_value_t = 1)]
        min_samples_leaf: usize,

        /// Impurity criterion: "gini" or "entropy"
        #[arg(long, default_value = "gini")]
        criterion: String,

        /// Print the rendered tree to stderr
        #[arg(long, default_value_t = false)]
        show_tree: bool,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Sweep both criteria across depths 1..=max_depth
    Compare {
        /// Largest depth in the sweep
        #[arg(long, default_value_t = 8)]
        max_depth: usize,

        #[command(flatten)]
        data: DataArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct FitOutput {
    config: TreeConfig,
    n_train: usize,
    n_test: usize,
    train_accuracy: f64,
    test_accuracy: f64,
    tree: TreeInfo,
    importances: Vec<RankedFeature>,
}

#[derive(Serialize)]
struct CompareRow {
    criterion: SplitCriterion,
    max_depth: usize,
    train_accuracy: f64,
    test_accuracy: f64,
    depth: usize,
    nodes: usize,
    leaves: usize,
}

#[derive(Serialize)]
struct CompareOutput {
    n_train: usize,
    n_test: usize,
    runs: Vec<CompareRow>,
}

fn load_dataset(args: &DataArgs, seed: u64) -> Result<TrainTestSplit> {
    let (features, labels) = match args.dataset.as_str() {
        "blobs" => {
            let config = SyntheticConfig::new(args.n_samples)
                .with_n_features(args.n_features)
                .with_n_informative(args.n_informative)
                .with_n_classes(args.n_classes)
                .with_class_sep(args.class_sep)
                .with_noise(args.noise)
                .with_seed(seed);
            make_classification(&config).context("failed to generate blobs dataset")?
        }
        "xor" => make_xor(args.n_samples, seed).context("failed to generate xor dataset")?,
        other => anyhow::bail!("unknown dataset: {other} (expected blobs or xor)"),
    };
    info!(n_samples = features.len(), "dataset generated");

    let split = train_test_split(&features, &labels, args.test_fraction, seed)
        .context("failed to split dataset")?;
    info!(
        n_train = split.train_labels.len(),
        n_test = split.test_labels.len(),
        "dataset split"
    );
    Ok(split)
}

fn fit_and_score(
    config: TreeConfig,
    split: &TrainTestSplit,
) -> Result<(DecisionTreeClassifier, f64, f64)> {
    let mut model = DecisionTreeClassifier::new(config).context("invalid tree configuration")?;
    model
        .fit(&split.train_features, &split.train_labels)
        .context("fitting failed")?;
    let train_accuracy = model.score(&split.train_features, &split.train_labels)?;
    let test_accuracy = model.score(&split.test_features, &split.test_labels)?;
    Ok((model, train_accuracy, test_accuracy))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Fit {
            max_depth,
            min_samples_split,
            min_samples_leaf,
            criterion,
            show_tree,
            data,
        } => {
            let criterion: SplitCriterion = criterion.parse()?;
            let config = TreeConfig::new()
                .with_max_depth(max_depth)
                .with_min_samples_split(min_samples_split)
                .with_min_samples_leaf(min_samples_leaf)
                .with_criterion(criterion);

            let split = load_dataset(&data, cli.seed)?;
            let (model, train_accuracy, test_accuracy) = fit_and_score(config.clone(), &split)?;
            info!(train_accuracy, test_accuracy, "model evaluated");

            if show_tree {
                let tree = model.tree()?;
                let mut renderer = TreeRenderer::new(tree);
                if let Some(names) = model.feature_names() {
                    renderer = renderer.with_feature_names(names);
                }
                eprint!("{renderer}");
            }

            let output = FitOutput {
                config,
                n_train: split.train_labels.len(),
                n_test: split.test_labels.len(),
                train_accuracy,
                test_accuracy,
                tree: model.tree_info()?,
                importances: model.ranked_importances()?,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Compare { max_depth, data } => {
            // Validate the sweep bound before generating any data.
            TreeConfig::new().with_max_depth(max_depth).validate()?;
            let split = load_dataset(&data, cli.seed)?;

            let mut runs = Vec::new();
            for criterion in [SplitCriterion::Gini, SplitCriterion::Entropy] {
                for depth_limit in 1..=max_depth {
                    let config = TreeConfig::new()
                        .with_max_depth(depth_limit)
                        .with_criterion(criterion);
                    let (model, train_accuracy, test_accuracy) = fit_and_score(config, &split)?;
                    let tree = model.tree_info()?;
                    info!(
                        %criterion,
                        max_depth = depth_limit,
                        train_accuracy,
                        test_accuracy,
                        "run complete"
                    );
                    runs.push(CompareRow {
                        criterion,
                        max_depth: depth_limit,
                        train_accuracy,
                        test_accuracy,
                        depth: tree.depth,
                        nodes: tree.nodes,
                        leaves: tree.leaves,
                    });
                }
            }

            let output = CompareOutput {
                n_train: split.train_labels.len(),
                n_test: split.test_labels.len(),
                runs,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
