//! Dataset collaborators for arbor: synthetic generators and seeded splits.

mod error;
mod split;
mod synth;

pub use error::DataError;
pub use split::{TrainTestSplit, train_test_split};
pub use synth::{SyntheticConfig, make_classification, make_xor};
