//! Decision-tree induction.
//!
//! Training recursively partitions the training set by the single pixel
//! that minimizes weighted Gini impurity, stopping once a subset is pure
//! enough (majority share above [`TreeConfig::threshold_ratio`]).
//!
//! # Key Items
//!
//! - [`build_tree`]: train a [`crate::DecisionTree`] from a dataset
//! - [`TreeConfig`]: training configuration (builder pattern)
//! - [`gini_impurity`] / [`find_best_split`]: the split search primitives

mod builder;
mod config;
mod impurity;
mod partition;
mod split;

pub use builder::{build_tree, BuildError};
pub use config::{ConfigError, TreeConfig, Verbosity};
pub use impurity::{gini_impurity, most_frequent_label};
pub use partition::partition_by_pixel;
pub use split::find_best_split;
