//! digitree: decision-tree and k-NN classifiers for handwritten digits.
//!
//! Native Rust implementations of two classic supervised classifiers over
//! small fixed-size grayscale digit images (labels 0-9):
//!
//! - A binary decision tree trained by recursive Gini-impurity splitting
//! - A k-nearest-neighbor classifier using Euclidean distance over raw pixels
//!
//! # Key Types
//!
//! - [`Dataset`] / [`ImageView`] - Labeled image storage and borrowed views
//! - [`DecisionTree`] - Flat tree storage with traversal and validation
//! - [`TreeConfig`] - Training configuration builder
//! - [`KnnClassifier`] - Linear-scan nearest-neighbor predictor
//!
//! # Training
//!
//! Use `TreeConfig::builder()` to configure, then [`build_tree`].
//! See the [`training`] module for details.
//!
//! # Loading Data
//!
//! [`data::io`] reads the binary labeled-image format and ASCII PGM files.

pub mod data;
pub mod knn;
pub mod metrics;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Data types (for preparing training data)
pub use data::{DataError, Dataset, ImageView};

// Tree representation and traversal
pub use repr::{DecisionTree, NodeId, TreeValidationError, PIXEL_THRESHOLD};

// Training entry points
pub use training::{build_tree, BuildError, ConfigError, TreeConfig, Verbosity};

// Nearest-neighbor collaborator
pub use knn::KnnClassifier;

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
