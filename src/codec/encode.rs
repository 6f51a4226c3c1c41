//! # Image Encoding
//!
//! Packs grids into interleaved 8-bit RGB (`R, G, B, R, G, B, ...`, rows
//! top to bottom) and writes them with the `image` crate. The file format
//! follows the output path's extension.
//!
//! ## Staged Writes
//!
//! Images are first encoded into a temporary file next to the target and
//! only renamed into place by [`PendingImage::commit`]. A failed encode
//! leaves nothing behind, and a caller writing several files can encode all
//! of them before committing any.
//!
//! ## Lossless Output
//!
//! Binary images must stay pure black and white, so they are only written
//! in lossless formats (PNG, BMP, TIFF, PNM). Lossy extensions such as
//! `.jpg` are rejected for binary output.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StipplerError};
use crate::grid::Grid;
use crate::pixel::Binary;

/// Suffix inserted before the extension of the default output path.
pub const DEFAULT_SUFFIX: &str = "_shaded";

/// Black becomes `0, 0, 0`, white becomes `255, 255, 255`.
pub fn pack_binary(image: &Grid<Binary>) -> Vec<u8> {
    image.cells().iter().flat_map(|p| p.to_rgb8()).collect()
}

/// Each gray value `f` becomes three copies of `trunc(f * 255)`.
///
/// Out-of-range values saturate to 0 or 255.
pub fn pack_gray(gray: &Grid<f64>) -> Vec<u8> {
    gray.cells()
        .iter()
        .flat_map(|&f| {
            let v = (f * 255.0) as u8;
            [v, v, v]
        })
        .collect()
}

/// True for formats that store RGB8 pixels without loss.
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Pnm
    )
}

/// An encoded image waiting in a temporary file beside its target.
///
/// Dropping it without calling [`commit`](Self::commit) deletes the
/// temporary file.
#[derive(Debug)]
pub struct PendingImage {
    file: NamedTempFile,
    target: PathBuf,
}

impl PendingImage {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the encoded file to its target path.
    pub fn commit(self) -> Result<PathBuf> {
        let target = self.target;
        self.file.persist(&target).map_err(|e| {
            StipplerError::Encode(format!("Failed to save {}: {}", target.display(), e))
        })?;
        debug!(path = %target.display(), "saved image");
        Ok(target)
    }
}

/// Encode interleaved RGB bytes into a temporary file for `path`.
pub fn stage_rgb(path: &Path, width: usize, height: usize, bytes: Vec<u8>) -> Result<PendingImage> {
    let encode_err =
        |e: &dyn std::fmt::Display| StipplerError::Encode(format!("Failed to save {}: {}", path.display(), e));

    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(StipplerError::Encode(format!(
                "Image too large to encode: {}x{}",
                width, height
            )));
        }
    };

    let image = RgbImage::from_raw(w, h, bytes).ok_or_else(|| {
        StipplerError::Encode(format!("Pixel buffer does not match {}x{}", width, height))
    })?;

    let format = ImageFormat::from_path(path).map_err(|e| encode_err(&e))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| encode_err(&e))?;

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|e| encode_err(&e))?;
        writer.flush().map_err(|e| encode_err(&e))?;
    }

    debug!(path = %path.display(), width, height, ?format, "encoded image");
    Ok(PendingImage {
        file,
        target: path.to_path_buf(),
    })
}

/// Stage a binary grid. Only lossless formats are accepted.
pub fn stage_binary(path: &Path, image: &Grid<Binary>) -> Result<PendingImage> {
    let lossless = ImageFormat::from_path(path).is_ok_and(is_lossless);
    if !lossless {
        return Err(StipplerError::Encode(format!(
            "{} is not a lossless format, a 1-bit image needs PNG, BMP, TIFF or PNM",
            path.display()
        )));
    }
    stage_rgb(path, image.width(), image.height(), pack_binary(image))
}

/// Stage a grayscale grid.
pub fn stage_gray(path: &Path, gray: &Grid<f64>) -> Result<PendingImage> {
    stage_rgb(path, gray.width(), gray.height(), pack_gray(gray))
}

/// Write interleaved RGB bytes to `path`.
pub fn save_rgb(path: &Path, width: usize, height: usize, bytes: Vec<u8>) -> Result<()> {
    stage_rgb(path, width, height, bytes)?.commit()?;
    Ok(())
}

/// Write a binary grid as an RGB image in a lossless format.
pub fn save_binary(path: &Path, image: &Grid<Binary>) -> Result<()> {
    stage_binary(path, image)?.commit()?;
    Ok(())
}

/// Write a grayscale grid as an RGB image.
pub fn save_gray(path: &Path, gray: &Grid<f64>) -> Result<()> {
    stage_gray(path, gray)?.commit()?;
    Ok(())
}

/// Derive the output path by inserting `suffix` before the extension.
///
/// Only lossless extensions are kept; anything else (including `.jpg` and
/// a missing extension) becomes `.png`.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use stippler::codec::encode::output_path;
///
/// assert_eq!(
///     output_path(Path::new("art/cat.png"), "_shaded"),
///     PathBuf::from("art/cat_shaded.png")
/// );
/// assert_eq!(
///     output_path(Path::new("cat.jpg"), "_shaded"),
///     PathBuf::from("cat_shaded.png")
/// );
/// ```
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .filter(|e| ImageFormat::from_extension(e).is_some_and(is_lossless))
        .unwrap_or_else(|| "png".to_string());

    input.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}
