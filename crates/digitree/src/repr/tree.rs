//! Flat (SoA) decision-tree storage, traversal, and structural validation.
//!
//! This module provides:
//! - [`DecisionTree`]: Immutable SoA tree storage for efficient traversal
//! - [`TreeValidationError`]: Structural validation errors
//!
//! Trees are produced by [`crate::training::build_tree`].

use crate::data::ImageView;

/// Index of a node within a tree's flat storage. The root is node 0.
pub type NodeId = u32;

/// Intensity threshold separating "dark" and "bright" pixels.
///
/// Traversal descends left when the inspected pixel is strictly below this
/// value; training partitions subsets by the same test, so the two always
/// agree.
pub const PIXEL_THRESHOLD: u8 = 128;

/// Structural validation errors for [`DecisionTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path (DAG) or due to a cycle.
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    UnreachableNode { node: NodeId },
    /// A split node references a pixel outside the image.
    SplitPixelOutOfRange { node: NodeId, pixel: usize },
}

/// Structure-of-Arrays decision tree storage.
///
/// Nodes live in flat parallel arrays indexed by [`NodeId`], root at 0.
/// An internal node carries the pixel it splits on and two child ids; a
/// leaf carries a digit label. Children are exclusively owned by the tree,
/// and dropping the tree releases every node exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    split_pixels: Box<[u16]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_labels: Box<[u8]>,
}

impl DecisionTree {
    /// Create a tree from parallel arrays.
    ///
    /// All arrays must have the same length (number of nodes). Leaf entries
    /// in `split_pixels`/children and split entries in `leaf_labels` are
    /// ignored by traversal; builders conventionally zero them.
    pub fn new(
        split_pixels: Vec<u16>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_labels: Vec<u8>,
    ) -> Self {
        let n_nodes = split_pixels.len();
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_labels.len());

        Self {
            split_pixels: split_pixels.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_labels: leaf_labels.into_boxed_slice(),
        }
    }

    // =========================================================================
    // Node Accessors
    // =========================================================================

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// The root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Pixel position a split node tests.
    #[inline]
    pub fn split_pixel(&self, node: NodeId) -> usize {
        self.split_pixels[node as usize] as usize
    }

    /// Left child (taken when the tested pixel is `< PIXEL_THRESHOLD`).
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    /// Right child (taken when the tested pixel is `>= PIXEL_THRESHOLD`).
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    /// Digit label stored at a leaf node.
    #[inline]
    pub fn leaf_label(&self, node: NodeId) -> u8 {
        self.leaf_labels[node as usize]
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Traverse from the root to the leaf this image reaches.
    ///
    /// At each split node the image's pixel at the node's stored position is
    /// inspected: `< PIXEL_THRESHOLD` descends left, otherwise right.
    /// O(depth), no mutation.
    #[inline]
    pub fn traverse_to_leaf(&self, image: &ImageView<'_>) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            node = if image.pixel(self.split_pixel(node)) < PIXEL_THRESHOLD {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }
        node
    }

    /// Predicted digit label for a single image.
    pub fn predict(&self, image: &ImageView<'_>) -> u8 {
        self.leaf_label(self.traverse_to_leaf(image))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }

    /// Depth of the tree: edges on the longest root-to-leaf path.
    ///
    /// A single-leaf tree has depth 0. Assumes a structurally valid tree.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];

        while let Some((node, depth)) = stack.pop() {
            if self.is_leaf(node) {
                max_depth = max_depth.max(depth);
            } else {
                stack.push((self.left_child(node), depth + 1));
                stack.push((self.right_child(node), depth + 1));
            }
        }

        max_depth
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate basic structural invariants for this tree.
    ///
    /// Checks that every child pointer is in bounds, no node is its own
    /// child, every node is reached exactly once from the root, and split
    /// pixels fit within `n_pixels`. Intended for debug checks and tests.
    pub fn validate(&self, n_pixels: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            match phase {
                0 => {
                    match color[node_usize] {
                        0 => {}
                        1 => return Err(TreeValidationError::CycleDetected { node }),
                        2 => return Err(TreeValidationError::DuplicateVisit { node }),
                        _ => unreachable!(),
                    }

                    color[node_usize] = 1;
                    stack.push((node, 1));

                    if !self.is_leaf(node) {
                        if self.split_pixel(node) >= n_pixels {
                            return Err(TreeValidationError::SplitPixelOutOfRange {
                                node,
                                pixel: self.split_pixel(node),
                            });
                        }

                        let left = self.left_child(node);
                        let right = self.right_child(node);

                        if left == node || right == node {
                            return Err(TreeValidationError::SelfLoop { node });
                        }
                        if left as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "left",
                                child: left,
                                n_nodes,
                            });
                        }
                        if right as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "right",
                                child: right,
                                n_nodes,
                            });
                        }

                        // Visit children
                        stack.push((right, 0));
                        stack.push((left, 0));
                    }
                }
                1 => {
                    color[node_usize] = 2;
                }
                _ => unreachable!(),
            }
        }

        for (i, &c) in color.iter().enumerate() {
            if c == 0 {
                return Err(TreeValidationError::UnreachableNode { node: i as u32 });
            }
        }

        Ok(())
    }
}
