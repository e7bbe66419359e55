//! Decision tree representation.

mod tree;

pub use tree::{DecisionTree, NodeId, TreeValidationError, PIXEL_THRESHOLD};
