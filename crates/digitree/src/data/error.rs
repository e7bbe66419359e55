//! Error type for dataset construction and loading.

use std::path::PathBuf;

/// Errors produced while constructing or loading a [`super::Dataset`].
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: failed to read the 4-byte item count")]
    MissingCount { path: PathBuf },

    #[error("{path}: record {index} is truncated (expected {expected} bytes)")]
    TruncatedRecord {
        path: PathBuf,
        index: usize,
        expected: usize,
    },

    #[error("label count {got} does not match image count {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("image dimensions {width}x{height} do not cover {n_pixels} pixels")]
    DimensionMismatch {
        width: usize,
        height: usize,
        n_pixels: usize,
    },

    #[error("item {index} has label {label}, expected 0..=9")]
    InvalidLabel { index: usize, label: u8 },

    #[error("{path}: malformed PGM header (expected \"P2 <width> <height> 255\")")]
    PgmHeader { path: PathBuf },

    #[error("{path}: PGM payload has {got} pixel values, expected {expected}")]
    PgmPixelCount {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    #[error("{path}: PGM pixel value {token:?} is not in 0..=255")]
    PgmPixelValue { path: PathBuf, token: String },

    #[error("{path}: filename carries no `<index>-<label>.pgm` label")]
    MissingFilenameLabel { path: PathBuf },

    #[error("dataset list {path} names no images")]
    EmptyList { path: PathBuf },
}
