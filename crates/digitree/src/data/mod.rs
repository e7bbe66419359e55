//! Labeled digit-image datasets.
//!
//! This module provides the in-memory dataset the classifiers consume and
//! the loaders that produce it.
//!
//! # Overview
//!
//! - [`Dataset`]: an ordered collection of fixed-size grayscale images with
//!   one label in `0..=9` per image. Read-only after construction.
//! - [`ImageView`]: a borrowed view of one image's pixels plus its
//!   width/height metadata. Pixel data is never copied out of the dataset.
//! - [`io`]: binary dataset codec, ASCII PGM reader/writer, and the
//!   file-list loader.
//!
//! # Storage Layout
//!
//! Pixels are stored sample-major in an `ndarray::Array2<u8>` of shape
//! `[n_items, n_pixels]`, so each image is one contiguous row.

mod dataset;
mod error;
pub mod io;

pub use dataset::{Dataset, ImageView, HEIGHT, NUM_PIXELS, N_LABELS, WIDTH};
pub use error::DataError;
