//! Gini impurity evaluation and label frequency tallies.

use crate::data::{Dataset, N_LABELS};
use crate::repr::PIXEL_THRESHOLD;

/// Weighted Gini impurity of splitting a subset at `pixel`.
///
/// The subset is given as indices into `data`. Thresholding the pixel's
/// intensity at [`PIXEL_THRESHOLD`] yields two groups; each group's impurity
/// is `Σ p(1-p)` over the per-label probabilities, and the result is the
/// size-weighted average of the two.
///
/// If a group is empty its probabilities are `0/0` and the score is NaN.
/// That NaN deliberately propagates to the caller: it marks a pixel that
/// cannot usefully split this subset, and [`super::find_best_split`] skips
/// it. It is an expected value, not an error.
///
/// Pure function; no mutation, no side effects.
pub fn gini_impurity(data: &Dataset, indices: &[u32], pixel: usize) -> f64 {
    debug_assert!(!indices.is_empty(), "impurity of an empty subset");

    let mut a_freq = [0u32; N_LABELS];
    let mut a_count = 0u32;
    let mut b_freq = [0u32; N_LABELS];
    let mut b_count = 0u32;

    for &item in indices {
        let item = item as usize;
        if data.pixel(item, pixel) < PIXEL_THRESHOLD {
            a_freq[data.label(item) as usize] += 1;
            a_count += 1;
        } else {
            b_freq[data.label(item) as usize] += 1;
            b_count += 1;
        }
    }

    let mut a_gini = 0.0f64;
    let mut b_gini = 0.0f64;
    for label in 0..N_LABELS {
        let a_p = f64::from(a_freq[label]) / f64::from(a_count);
        let b_p = f64::from(b_freq[label]) / f64::from(b_count);
        a_gini += a_p * (1.0 - a_p);
        b_gini += b_p * (1.0 - b_p);
    }

    // Weighted average of the two groups' impurities. An empty group makes
    // its gini NaN, and NaN * 0 keeps the whole score NaN.
    (a_gini * f64::from(a_count) + b_gini * f64::from(b_count)) / indices.len() as f64
}

/// Most frequent label in a subset and its frequency.
///
/// Ties resolve to the smallest label value.
pub fn most_frequent_label(data: &Dataset, indices: &[u32]) -> (u8, usize) {
    debug_assert!(!indices.is_empty(), "majority of an empty subset");

    let mut freq = [0usize; N_LABELS];
    for &item in indices {
        freq[data.label(item as usize) as usize] += 1;
    }

    let mut best = 0usize;
    for label in 1..N_LABELS {
        if freq[label] > freq[best] {
            best = label;
        }
    }
    (best as u8, freq[best])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    /// One pixel per image; intensities and labels given directly.
    fn pixel_column_dataset(pixels: &[u8], labels: &[u8]) -> Dataset {
        let n = pixels.len();
        let images = Array2::from_shape_vec((n, 1), pixels.to_vec()).unwrap();
        Dataset::new(images, Array1::from_vec(labels.to_vec()), 1, 1).unwrap()
    }

    fn all_indices(data: &Dataset) -> Vec<u32> {
        (0..data.n_items() as u32).collect()
    }

    #[test]
    fn perfect_split_scores_zero() {
        // Dark pixels are all label 0, bright pixels all label 1.
        let data = pixel_column_dataset(&[0, 10, 200, 250], &[0, 0, 1, 1]);
        let score = gini_impurity(&data, &all_indices(&data), 0);
        assert!(score.abs() < 1e-12, "got {score}");
    }

    #[test]
    fn mixed_split_scores_half() {
        // Both groups are 50/50 two-label mixes: impurity 0.5 each.
        let data = pixel_column_dataset(&[0, 10, 200, 250], &[0, 1, 0, 1]);
        let score = gini_impurity(&data, &all_indices(&data), 0);
        approx::assert_abs_diff_eq!(score, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn one_sided_split_is_nan() {
        // Every pixel is dark: group B is empty.
        let data = pixel_column_dataset(&[0, 10, 20], &[0, 1, 2]);
        let score = gini_impurity(&data, &all_indices(&data), 0);
        assert!(score.is_nan());
    }

    #[test]
    fn impurity_bounds_when_both_groups_nonempty() {
        // A spread of imbalanced groupings; all scores must land in [0, 1).
        let cases: &[(&[u8], &[u8])] = &[
            (&[0, 200], &[0, 0]),
            (&[0, 0, 200, 200, 200], &[0, 1, 2, 2, 3]),
            (&[10, 250, 250, 250], &[9, 0, 1, 9]),
        ];
        for (pixels, labels) in cases {
            let data = pixel_column_dataset(pixels, labels);
            let score = gini_impurity(&data, &all_indices(&data), 0);
            assert!((0.0..1.0).contains(&score), "got {score}");
        }
    }

    #[test]
    fn impurity_respects_subset_indices() {
        let data = pixel_column_dataset(&[0, 200, 0, 200], &[0, 0, 1, 1]);
        // Restricted to items 0 and 1, both groups are pure label 0.
        let score = gini_impurity(&data, &[0, 1], 0);
        assert!(score.abs() < 1e-12, "got {score}");
    }

    #[test]
    fn majority_label_full_scan() {
        let data = pixel_column_dataset(&[0, 0, 0, 0, 0], &[3, 7, 3, 3, 7]);
        assert_eq!(most_frequent_label(&data, &all_indices(&data)), (3, 3));
    }

    #[test]
    fn majority_tie_resolves_to_smallest_label() {
        let data = pixel_column_dataset(&[0, 0, 0, 0], &[9, 2, 2, 9]);
        assert_eq!(most_frequent_label(&data, &all_indices(&data)), (2, 2));
    }

    #[test]
    fn majority_of_subset() {
        let data = pixel_column_dataset(&[0, 0, 0], &[5, 6, 6]);
        assert_eq!(most_frequent_label(&data, &[0]), (5, 1));
        assert_eq!(most_frequent_label(&data, &[1, 2]), (6, 2));
    }
}
