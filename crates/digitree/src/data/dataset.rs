//! Dataset container and image views.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::error::DataError;

/// Width of a standard digit image in pixels.
pub const WIDTH: usize = 28;
/// Height of a standard digit image in pixels.
pub const HEIGHT: usize = 28;
/// Pixel count of a standard digit image.
pub const NUM_PIXELS: usize = WIDTH * HEIGHT;
/// Number of distinct digit labels.
pub const N_LABELS: usize = 10;

/// An ordered collection of labeled grayscale digit images.
///
/// # Storage Layout
///
/// Pixels are stored **sample-major**: `[n_items, n_pixels]`. Each image's
/// pixels are contiguous in memory, which keeps single-image traversal and
/// distance scans cache-friendly.
///
/// The dataset is read-only once constructed; training and classification
/// only ever borrow from it.
///
/// # Example
///
/// ```
/// use digitree::data::Dataset;
/// use ndarray::{array, Array2};
///
/// // 2 images of 4 pixels each (2x2), labels 0 and 1
/// let images = array![[0u8, 10, 20, 30], [200, 210, 220, 230]];
/// let labels = array![0u8, 1];
/// let ds = Dataset::new(images, labels, 2, 2).unwrap();
///
/// assert_eq!(ds.n_items(), 2);
/// assert_eq!(ds.n_pixels(), 4);
/// assert_eq!(ds.label(1), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Pixel data: `[n_items, n_pixels]` (sample-major).
    images: Array2<u8>,
    /// One label in `0..=9` per image.
    labels: Array1<u8>,
    width: usize,
    height: usize,
}

impl Dataset {
    /// Create a dataset from sample-major pixel data and labels.
    ///
    /// # Arguments
    ///
    /// * `images` - Pixel matrix `[n_items, n_pixels]`
    /// * `labels` - One label per image, each in `0..=9`
    /// * `width` / `height` - Image dimensions; `width * height` must equal
    ///   the pixel count per image
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the label count does not match the image
    /// count, the dimensions do not cover the pixel count, or any label is
    /// outside `0..=9`.
    pub fn new(
        images: Array2<u8>,
        labels: Array1<u8>,
        width: usize,
        height: usize,
    ) -> Result<Self, DataError> {
        if labels.len() != images.nrows() {
            return Err(DataError::ShapeMismatch {
                expected: images.nrows(),
                got: labels.len(),
            });
        }
        if width * height != images.ncols() {
            return Err(DataError::DimensionMismatch {
                width,
                height,
                n_pixels: images.ncols(),
            });
        }
        if let Some((index, &label)) = labels
            .iter()
            .enumerate()
            .find(|(_, &l)| l as usize >= N_LABELS)
        {
            return Err(DataError::InvalidLabel { index, label });
        }

        Ok(Self {
            images,
            labels,
            width,
            height,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of images.
    #[inline]
    pub fn n_items(&self) -> usize {
        self.images.nrows()
    }

    /// Pixels per image.
    #[inline]
    pub fn n_pixels(&self) -> usize {
        self.images.ncols()
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Label of image `item`.
    #[inline]
    pub fn label(&self, item: usize) -> u8 {
        self.labels[item]
    }

    /// Pixel intensity of image `item` at position `pixel`.
    ///
    /// This is the hot path of impurity evaluation and partitioning.
    #[inline]
    pub fn pixel(&self, item: usize, pixel: usize) -> u8 {
        self.images[[item, pixel]]
    }

    /// Borrowed view of image `item`.
    #[inline]
    pub fn image(&self, item: usize) -> ImageView<'_> {
        ImageView {
            pixels: self.images.row(item),
            width: self.width,
            height: self.height,
        }
    }

    /// All labels.
    pub fn labels(&self) -> ArrayView1<'_, u8> {
        self.labels.view()
    }

    /// All pixel data, `[n_items, n_pixels]`.
    pub fn images(&self) -> ArrayView2<'_, u8> {
        self.images.view()
    }
}

/// A borrowed view of one image: pixels plus width/height metadata.
///
/// Views borrow either from a [`Dataset`] row or from caller-owned storage
/// (for query images that are not part of any dataset).
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pixels: ArrayView1<'a, u8>,
    width: usize,
    height: usize,
}

impl<'a> ImageView<'a> {
    /// Wrap caller-owned pixel storage as an image.
    ///
    /// Debug-asserts that `width * height` equals the pixel count.
    pub fn new(pixels: ArrayView1<'a, u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            width * height,
            pixels.len(),
            "width * height must equal the pixel count"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Wrap a pixel slice as an image.
    pub fn from_slice(pixels: &'a [u8], width: usize, height: usize) -> Self {
        Self::new(ArrayView1::from(pixels), width, height)
    }

    /// Pixel intensity at position `pixel`.
    #[inline]
    pub fn pixel(&self, pixel: usize) -> u8 {
        self.pixels[pixel]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> ArrayView1<'a, u8> {
        self.pixels
    }

    /// Pixel count.
    #[inline]
    pub fn n_pixels(&self) -> usize {
        self.pixels.len()
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}
