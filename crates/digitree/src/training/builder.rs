//! Recursive decision-tree construction.

use crate::data::Dataset;
use crate::repr::{DecisionTree, NodeId};

use super::config::{TreeConfig, Verbosity};
use super::impurity::most_frequent_label;
use super::partition::partition_by_pixel;
use super::split::find_best_split;

/// Errors that can occur during tree construction.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot build a tree from an empty dataset")]
    EmptyDataset,
}

/// Build a decision tree from every item in `data`.
///
/// Construction is fully deterministic: the same dataset and configuration
/// always produce a structurally identical tree. The recursion works on an
/// index buffer covering the whole dataset and partitions it in place, so
/// each call's subset is a sub-slice scoped to that call.
///
/// # Errors
///
/// Returns [`BuildError::EmptyDataset`] if `data` holds no items.
pub fn build_tree(data: &Dataset, config: &TreeConfig) -> Result<DecisionTree, BuildError> {
    if data.n_items() == 0 {
        return Err(BuildError::EmptyDataset);
    }

    let mut rows: Vec<u32> = (0..data.n_items() as u32).collect();
    let mut grower = TreeGrower::new(data, config.threshold_ratio);
    grower.build_node(&mut rows);
    let tree = grower.finish();

    if config.verbosity == Verbosity::Info {
        eprintln!(
            "built tree: {} nodes, {} leaves, depth {}",
            tree.n_nodes(),
            tree.n_leaves(),
            tree.depth()
        );
    }

    Ok(tree)
}

/// Grows the flat node arrays during one build.
///
/// Nodes are appended parent-first, left subtree before right, which makes
/// node ids (and therefore whole trees) reproducible.
struct TreeGrower<'a> {
    data: &'a Dataset,
    threshold_ratio: f64,
    split_pixels: Vec<u16>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_labels: Vec<u8>,
}

impl<'a> TreeGrower<'a> {
    fn new(data: &'a Dataset, threshold_ratio: f64) -> Self {
        Self {
            data,
            threshold_ratio,
            split_pixels: Vec::new(),
            left_children: Vec::new(),
            right_children: Vec::new(),
            is_leaf: Vec::new(),
            leaf_labels: Vec::new(),
        }
    }

    /// Build the subtree for the subset in `rows` and return its root id.
    ///
    /// `rows` must be non-empty; the partition step guarantees both child
    /// calls see non-empty sub-slices (a pixel leaving one side empty
    /// scores NaN and is never selected).
    fn build_node(&mut self, rows: &mut [u32]) -> NodeId {
        debug_assert!(!rows.is_empty());

        let (label, count) = most_frequent_label(self.data, rows);

        // Stopping rule: pure enough, emit a leaf.
        if count as f64 / rows.len() as f64 > self.threshold_ratio {
            return self.push_leaf(label);
        }

        // No pixel separates this subset at all (every score NaN). The
        // subset is stuck below the purity threshold; settle for its
        // majority label instead of splitting.
        let Some(pixel) = find_best_split(self.data, rows) else {
            return self.push_leaf(label);
        };

        let mid = partition_by_pixel(self.data, rows, pixel);
        debug_assert!(
            mid > 0 && mid < rows.len(),
            "selected pixel must split the subset into two non-empty groups"
        );

        let node = self.push_split(pixel);
        let (left_rows, right_rows) = rows.split_at_mut(mid);
        let left = self.build_node(left_rows);
        let right = self.build_node(right_rows);
        self.left_children[node as usize] = left;
        self.right_children[node as usize] = right;
        node
    }

    fn push_leaf(&mut self, label: u8) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_pixels.push(0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.leaf_labels.push(label);
        id
    }

    /// Push a split node with child ids patched in later by the caller.
    fn push_split(&mut self, pixel: usize) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_pixels.push(pixel as u16);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(false);
        self.leaf_labels.push(0);
        id
    }

    fn finish(self) -> DecisionTree {
        DecisionTree::new(
            self.split_pixels,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.leaf_labels,
        )
    }
}
