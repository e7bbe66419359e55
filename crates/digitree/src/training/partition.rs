//! In-place index partitioning for tree building.
//!
//! During the recursive build, the subset of training examples reaching a
//! node is a sub-slice of one shared index buffer. Splitting a node
//! rearranges that sub-slice in place so the left group occupies its front
//! and the right group its back; the recursion then borrows the two halves.
//! No per-call allocation, and each call's subset dies with the call.

use crate::data::Dataset;
use crate::repr::PIXEL_THRESHOLD;

/// Partition `rows` in place by `pixel < PIXEL_THRESHOLD`.
///
/// Uses a Dutch-flag two-pointer sweep. On return, `rows[..mid]` holds the
/// items whose pixel is below the threshold and `rows[mid..]` the rest;
/// `mid` is returned. Relative order within the groups is not preserved.
pub fn partition_by_pixel(data: &Dataset, rows: &mut [u32], pixel: usize) -> usize {
    let mut left = 0;
    let mut right = rows.len();

    while left < right {
        if data.pixel(rows[left] as usize, pixel) < PIXEL_THRESHOLD {
            left += 1;
        } else {
            right -= 1;
            rows.swap(left, right);
        }
    }

    left
}
