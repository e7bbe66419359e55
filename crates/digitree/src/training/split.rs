//! Best-split search over pixel positions.

use crate::data::Dataset;

use super::impurity::gini_impurity;

/// Find the pixel that minimizes weighted Gini impurity for a subset.
///
/// Scans every pixel position, skipping those whose score is NaN (one side
/// of the split empty). The strict `<` comparison makes the smallest pixel
/// index win ties.
///
/// Returns `None` when every pixel scores NaN, i.e. no pixel separates the
/// subset at all (all images identical under thresholding). The builder
/// turns that degenerate subset into a majority leaf.
pub fn find_best_split(data: &Dataset, indices: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for pixel in 0..data.n_pixels() {
        let score = gini_impurity(data, indices, pixel);
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((pixel, score)),
        }
    }

    best.map(|(pixel, _)| pixel)
}
