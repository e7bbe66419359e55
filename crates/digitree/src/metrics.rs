//! Classification scoring over a test dataset.

use crate::data::{Dataset, ImageView};
use crate::utils::Parallelism;

/// Count how many of `data`'s images `predict` labels correctly.
///
/// Classification of distinct images is independent, so the scan may run
/// in parallel; the predictor only needs shared access.
pub fn n_correct<F>(predict: F, data: &Dataset, parallelism: Parallelism) -> usize
where
    F: Fn(&ImageView<'_>) -> u8 + Sync,
{
    parallelism
        .maybe_par_map(0..data.n_items(), |item| {
            usize::from(predict(&data.image(item)) == data.label(item))
        })
        .into_iter()
        .sum()
}

/// Fraction of correctly labeled images, in `[0, 1]`.
///
/// Returns 0.0 for an empty dataset.
pub fn accuracy<F>(predict: F, data: &Dataset, parallelism: Parallelism) -> f64
where
    F: Fn(&ImageView<'_>) -> u8 + Sync,
{
    if data.n_items() == 0 {
        return 0.0;
    }
    n_correct(predict, data, parallelism) as f64 / data.n_items() as f64
}
