//! k-nearest-neighbor digit classification.
//!
//! A linear-scan nearest-neighbor search over raw pixel vectors with a
//! majority vote among the k closest training images. Algorithmically
//! independent from the decision tree; both consume the same [`Dataset`].

use crate::data::{Dataset, ImageView, N_LABELS};

/// Euclidean distance between two images' raw pixel vectors.
///
/// Debug-asserts that both images have the same pixel count.
pub fn euclidean_distance(a: &ImageView<'_>, b: &ImageView<'_>) -> f64 {
    debug_assert_eq!(a.n_pixels(), b.n_pixels());

    let sum: f64 = a
        .pixels()
        .iter()
        .zip(b.pixels().iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    sum.sqrt()
}

/// Nearest-neighbor predictor borrowing a training dataset.
///
/// Keeps no state beyond the borrow; prediction is a full linear scan, so
/// the cost is O(n_items * n_pixels) per query.
#[derive(Debug, Clone, Copy)]
pub struct KnnClassifier<'a> {
    data: &'a Dataset,
}

impl<'a> KnnClassifier<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }

    /// Predict the digit label of `image` from its `k` nearest neighbors.
    ///
    /// The neighbor pool starts as the first `k` training images; a later
    /// image displaces the pool's current farthest member only when it is
    /// strictly closer, so earlier indices win distance ties. The pool's
    /// labels are majority-voted, ties resolving to the smallest digit.
    ///
    /// `k` is clamped to `1..=n_items`.
    pub fn predict(&self, image: &ImageView<'_>, k: usize) -> u8 {
        let n_items = self.data.n_items();
        debug_assert!(n_items > 0, "prediction over an empty dataset");
        let k = k.clamp(1, n_items);

        // (training index, distance) pool of the k nearest seen so far.
        let mut pool: Vec<(usize, f64)> = (0..k)
            .map(|item| (item, euclidean_distance(image, &self.data.image(item))))
            .collect();
        let mut farthest = argmax_distance(&pool);

        for item in k..n_items {
            let distance = euclidean_distance(image, &self.data.image(item));
            if distance < pool[farthest].1 {
                pool[farthest] = (item, distance);
                farthest = argmax_distance(&pool);
            }
        }

        let mut freq = [0usize; N_LABELS];
        for &(item, _) in &pool {
            freq[self.data.label(item) as usize] += 1;
        }
        let mut best = 0usize;
        for label in 1..N_LABELS {
            if freq[label] > freq[best] {
                best = label;
            }
        }
        best as u8
    }
}

fn argmax_distance(pool: &[(usize, f64)]) -> usize {
    let mut max_pos = 0;
    for (pos, &(_, distance)) in pool.iter().enumerate().skip(1) {
        if distance > pool[max_pos].1 {
            max_pos = pos;
        }
    }
    max_pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn dataset(rows: &[&[u8]], labels: &[u8]) -> Dataset {
        let n = rows.len();
        let n_pixels = rows[0].len();
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let images = Array2::from_shape_vec((n, n_pixels), flat).unwrap();
        Dataset::new(images, Array1::from_vec(labels.to_vec()), n_pixels, 1).unwrap()
    }

    #[test]
    fn distance_basics() {
        let a = [0u8, 0, 0, 0];
        let b = [3u8, 4, 0, 0];
        let va = ImageView::from_slice(&a, 2, 2);
        let vb = ImageView::from_slice(&b, 2, 2);

        assert_eq!(euclidean_distance(&va, &va), 0.0);
        approx::assert_abs_diff_eq!(euclidean_distance(&va, &vb), 5.0, epsilon = 1e-12);
        // Symmetry
        assert_eq!(
            euclidean_distance(&va, &vb),
            euclidean_distance(&vb, &va)
        );
    }

    #[test]
    fn one_nearest_neighbor() {
        let data = dataset(&[&[0, 0], &[250, 250], &[100, 100]], &[1, 2, 3]);
        let knn = KnnClassifier::new(&data);

        let query = [240u8, 240];
        assert_eq!(knn.predict(&ImageView::from_slice(&query, 2, 1), 1), 2);
    }

    #[test]
    fn majority_vote_over_k() {
        // Two label-5 images sit close to the query, one label-8 closer
        // than either: k=3 votes 5.
        let data = dataset(
            &[&[10, 10], &[12, 12], &[0, 0], &[200, 200]],
            &[5, 5, 8, 9],
        );
        let knn = KnnClassifier::new(&data);

        let query = [8u8, 8];
        let view = ImageView::from_slice(&query, 2, 1);
        assert_eq!(knn.predict(&view, 1), 8);
        assert_eq!(knn.predict(&view, 3), 5);
    }

    #[test]
    fn vote_tie_resolves_to_smallest_digit() {
        let data = dataset(&[&[0, 0], &[10, 10], &[20, 20], &[30, 30]], &[7, 2, 7, 2]);
        let knn = KnnClassifier::new(&data);

        let query = [15u8, 15];
        assert_eq!(knn.predict(&ImageView::from_slice(&query, 2, 1), 4), 2);
    }

    #[test]
    fn k_is_clamped_to_dataset_size() {
        let data = dataset(&[&[0, 0], &[200, 200]], &[1, 1]);
        let knn = KnnClassifier::new(&data);

        let query = [0u8, 0];
        assert_eq!(knn.predict(&ImageView::from_slice(&query, 2, 1), 100), 1);
        assert_eq!(knn.predict(&ImageView::from_slice(&query, 2, 1), 0), 1);
    }
}
