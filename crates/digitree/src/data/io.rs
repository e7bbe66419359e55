//! Dataset and image loaders.
//!
//! Two on-disk formats are supported:
//!
//! - **Binary dataset**: a 4-byte little-endian item count `N`, followed by
//!   `N` records of one label byte and [`NUM_PIXELS`] pixel bytes. Read with
//!   [`load_dataset`], written with [`write_dataset`].
//! - **ASCII PGM** (`P2`): one image per file, label encoded in the filename
//!   as `<index>-<label>.pgm`. A dataset is a text file listing one image
//!   filename per line; read with [`load_dataset_list`].
//!
//! Every loader returns [`DataError`] on malformed or truncated input; the
//! classifiers can assume any dataset that loads is well-formed.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::{Array1, Array2};

use super::dataset::{Dataset, ImageView, HEIGHT, NUM_PIXELS, WIDTH};
use super::error::DataError;

/// Load a binary dataset file.
///
/// The label range and shape checks happen in [`Dataset::new`]; a file that
/// loads successfully satisfies every invariant the classifiers rely on.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);

    let mut count_buf = [0u8; 4];
    reader
        .read_exact(&mut count_buf)
        .map_err(|_| DataError::MissingCount {
            path: path.to_path_buf(),
        })?;
    let n_items = u32::from_le_bytes(count_buf) as usize;

    let mut pixels = Vec::with_capacity(n_items * NUM_PIXELS);
    let mut labels = Vec::with_capacity(n_items);
    let mut record = [0u8; 1 + NUM_PIXELS];

    for index in 0..n_items {
        reader
            .read_exact(&mut record)
            .map_err(|_| DataError::TruncatedRecord {
                path: path.to_path_buf(),
                index,
                expected: record.len(),
            })?;
        labels.push(record[0]);
        pixels.extend_from_slice(&record[1..]);
    }

    let images = Array2::from_shape_vec((n_items, NUM_PIXELS), pixels)
        .expect("shape follows from construction");
    Dataset::new(images, Array1::from_vec(labels), WIDTH, HEIGHT)
}

/// Write a dataset in the binary format read by [`load_dataset`].
///
/// Intended for tests and tooling; the images must be standard
/// [`WIDTH`]`x`[`HEIGHT`] digits.
pub fn write_dataset<P: AsRef<Path>>(path: P, data: &Dataset) -> Result<(), DataError> {
    let path = path.as_ref();
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };
    debug_assert_eq!(data.n_pixels(), NUM_PIXELS);

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(&(data.n_items() as u32).to_le_bytes())
        .map_err(io_err)?;
    for item in 0..data.n_items() {
        writer.write_all(&[data.label(item)]).map_err(io_err)?;
        let image = data.image(item);
        let row = image
            .pixels()
            .to_slice()
            .expect("dataset rows are contiguous");
        writer.write_all(row).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

/// Load a single ASCII PGM (`P2`) image.
///
/// Returns the pixels in row-major order together with the image width and
/// height. Only maxval 255 is accepted.
pub fn load_pgm<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), DataError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let header_err = || DataError::PgmHeader {
        path: path.to_path_buf(),
    };

    let mut tokens = text.split_whitespace();
    if tokens.next() != Some("P2") {
        return Err(header_err());
    }
    let width: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(header_err)?;
    let height: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(header_err)?;
    if tokens.next() != Some("255") {
        return Err(header_err());
    }

    let expected = width * height;
    let mut pixels = Vec::with_capacity(expected);
    for token in tokens {
        let value = token.parse::<u8>().map_err(|_| DataError::PgmPixelValue {
            path: path.to_path_buf(),
            token: token.to_string(),
        })?;
        pixels.push(value);
    }
    if pixels.len() != expected {
        return Err(DataError::PgmPixelCount {
            path: path.to_path_buf(),
            expected,
            got: pixels.len(),
        });
    }

    Ok((pixels, width, height))
}

/// Write one image as ASCII PGM (`P2`), one pixel row per line.
pub fn write_pgm<P: AsRef<Path>>(path: P, image: &ImageView<'_>) -> Result<(), DataError> {
    let path = path.as_ref();
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P2\n {} {}\n 255", image.width(), image.height()).map_err(io_err)?;
    for (i, &value) in image.pixels().iter().enumerate() {
        write!(writer, "{} ", value).map_err(io_err)?;
        if (i + 1) % image.width() == 0 {
            writeln!(writer).map_err(io_err)?;
        }
    }
    writer.flush().map_err(io_err)
}

/// Extract the label from an image filename of the form `<index>-<label>.pgm`.
///
/// Parses the decimal digits immediately following the first dash. The value
/// is range-checked later by [`Dataset::new`].
pub fn label_from_filename<P: AsRef<Path>>(path: P) -> Result<u8, DataError> {
    let path = path.as_ref();
    let missing = || DataError::MissingFilenameLabel {
        path: path.to_path_buf(),
    };

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(missing)?;
    let (_, rest) = name.split_once('-').ok_or_else(missing)?;
    let digits: &str = &rest[..rest.chars().take_while(|c| c.is_ascii_digit()).count()];
    digits.parse().map_err(|_| missing())
}

/// Load a dataset from a text file listing one PGM filename per line.
///
/// Each image's label comes from its filename. All images must share the
/// dimensions of the first one. Relative filenames resolve against the
/// current directory.
pub fn load_dataset_list<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pixels = Vec::new();
    let mut labels = Vec::new();
    let mut dims: Option<(usize, usize)> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let image_path = Path::new(line);
        let (image_pixels, width, height) = load_pgm(image_path)?;

        match dims {
            None => dims = Some((width, height)),
            Some((w, h)) if (w, h) != (width, height) => {
                return Err(DataError::DimensionMismatch {
                    width,
                    height,
                    n_pixels: w * h,
                });
            }
            Some(_) => {}
        }

        labels.push(label_from_filename(image_path)?);
        pixels.extend_from_slice(&image_pixels);
    }

    let (width, height) = dims.ok_or_else(|| DataError::EmptyList {
        path: path.to_path_buf(),
    })?;
    let n_items = labels.len();
    let images = Array2::from_shape_vec((n_items, width * height), pixels)
        .expect("shape follows from construction");
    Dataset::new(images, Array1::from_vec(labels), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_filename_parses_digit_after_dash() {
        assert_eq!(label_from_filename("00012-7.pgm").unwrap(), 7);
        assert_eq!(label_from_filename("images/3-0.pgm").unwrap(), 0);
    }

    #[test]
    fn label_from_filename_rejects_unlabeled_names() {
        assert!(matches!(
            label_from_filename("nolabel.pgm"),
            Err(DataError::MissingFilenameLabel { .. })
        ));
        assert!(matches!(
            label_from_filename("dash-but-no-digit-.pgm"),
            Err(DataError::MissingFilenameLabel { .. })
        ));
    }

    #[test]
    fn load_dataset_missing_file_is_io_error() {
        let result = load_dataset("/nonexistent/training.bin");
        assert!(matches!(result, Err(DataError::Io { .. })));
    }

    #[test]
    fn load_dataset_empty_file_has_no_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let result = load_dataset(&path);
        assert!(matches!(result, Err(DataError::MissingCount { .. })));
    }

    #[test]
    fn load_dataset_truncated_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");

        // Claims two records but carries half of one.
        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.push(1); // label
        bytes.extend(std::iter::repeat(0u8).take(100));
        fs::write(&path, &bytes).unwrap();

        let result = load_dataset(&path);
        assert!(matches!(
            result,
            Err(DataError::TruncatedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn pgm_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img-4.pgm");

        let pixels: Vec<u8> = (0..16).map(|i| (i * 16) as u8).collect();
        let image = ImageView::from_slice(&pixels, 4, 4);
        write_pgm(&path, &image).unwrap();

        let (loaded, width, height) = load_pgm(&path).unwrap();
        assert_eq!((width, height), (4, 4));
        assert_eq!(loaded, pixels);
    }

    #[test]
    fn load_pgm_rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pgm");
        fs::write(&path, "P5 2 2 255 0 0 0 0").unwrap();

        assert!(matches!(
            load_pgm(&path),
            Err(DataError::PgmHeader { .. })
        ));
    }

    #[test]
    fn load_pgm_rejects_out_of_range_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("range.pgm");
        fs::write(&path, "P2 2 1 255 12 900").unwrap();

        assert!(matches!(
            load_pgm(&path),
            Err(DataError::PgmPixelValue { .. })
        ));
    }

    #[test]
    fn load_pgm_rejects_short_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.pgm");
        fs::write(&path, "P2 2 2 255 1 2 3").unwrap();

        assert!(matches!(
            load_pgm(&path),
            Err(DataError::PgmPixelCount {
                expected: 4,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn load_dataset_list_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "\n  \n").unwrap();

        assert!(matches!(
            load_dataset_list(&path),
            Err(DataError::EmptyList { .. })
        ));
    }
}
