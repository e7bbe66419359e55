//! Deterministic synthetic data generators for tests and benchmarks.

use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::{Dataset, N_LABELS};

/// Generate a labeled digit dataset with one noisy prototype per label.
///
/// Each label `l < n_labels` gets a prototype image whose pixels are either
/// dark (near 0) or bright (near 255) depending on `l`'s bit pattern over
/// the pixel index; samples jitter the prototype by at most `noise` without
/// crossing the 128 boundary. Items cycle through labels round-robin, so
/// the dataset is separable and every label with `index < n_items` occurs.
pub fn synthetic_digits(
    n_items: usize,
    n_pixels: usize,
    n_labels: usize,
    seed: u64,
    noise: u8,
) -> Dataset {
    assert!(n_labels >= 1 && n_labels <= N_LABELS);
    assert!(noise < 64);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut pixels = Vec::with_capacity(n_items * n_pixels);
    let mut labels = Vec::with_capacity(n_items);
    for item in 0..n_items {
        let label = (item % n_labels) as u8;
        labels.push(label);
        for pixel in 0..n_pixels {
            let bright = (usize::from(label) >> (pixel % 8)) & 1 == 1;
            let jitter = rng.gen_range(0..=noise);
            pixels.push(if bright { 255 - jitter } else { jitter });
        }
    }

    let images = Array2::from_shape_vec((n_items, n_pixels), pixels)
        .expect("generated buffer matches the requested shape");
    Dataset::new(images, Array1::from_vec(labels), n_pixels, 1)
        .expect("generated data is well formed")
}

/// Generate a single query image of uniformly random pixels.
pub fn random_image(n_pixels: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_pixels).map(|_| rng.r#gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ImageView;

    #[test]
    fn generation_is_deterministic() {
        let a = synthetic_digits(20, 8, 4, 7, 20);
        let b = synthetic_digits(20, 8, 4, 7, 20);
        assert_eq!(a.images(), b.images());
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn labels_cycle_and_stay_in_range() {
        let data = synthetic_digits(12, 4, 3, 1, 0);
        for item in 0..data.n_items() {
            assert_eq!(data.label(item), (item % 3) as u8);
        }
    }

    #[test]
    fn noise_never_crosses_the_split_boundary() {
        let data = synthetic_digits(50, 8, 10, 42, 63);
        for item in 0..data.n_items() {
            for pixel in 0..data.n_pixels() {
                let value = data.pixel(item, pixel);
                assert!(value < 64 || value > 191, "item {item} pixel {pixel}: {value}");
            }
        }
    }

    #[test]
    fn same_label_items_share_the_bit_pattern() {
        let data = synthetic_digits(8, 8, 4, 3, 10);
        let a = data.image(1);
        let b = data.image(5);
        let bright = |img: &ImageView<'_>, p: usize| img.pixel(p) >= 128;
        for pixel in 0..8 {
            assert_eq!(bright(&a, pixel), bright(&b, pixel));
        }
    }
}
