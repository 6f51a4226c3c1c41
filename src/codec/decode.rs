//! # Image Decoding
//!
//! Reads an image file (or bytes) into a [`Grid`] of normalized [`Rgb`]
//! pixels. Everything the `image` crate can read is supported; HEIC/HEIF
//! needs the `heif` cargo feature.
//!
//! ## Raw Interleaved Rows
//!
//! [`from_interleaved_rows`] accepts 8-bit rows with no layout metadata and
//! guesses the channel count per [`channel_stride`]. The guess is a
//! heuristic, not a detection: an RGB row whose byte length is a multiple of
//! 4 but not of 3 cannot occur (RGB rows are always multiples of 3), but an
//! RGBA row whose length is a multiple of 12 is read as RGB and comes out
//! scrambled. Prefer [`open`] / [`from_memory`], which know the layout.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::error::{Result, StipplerError};
use crate::grid::Grid;
use crate::pixel::Rgb;

/// A decoded image and the channel layout of its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub pixels: Grid<Rgb>,
    /// 3 for sources without alpha, 4 for sources with alpha (discarded)
    pub channels: u8,
}

/// Decode an image file.
///
/// The channel layout comes from the file itself, so this path never uses
/// the [`channel_stride`] guess. That heuristic only applies to raw rows
/// passed to [`from_interleaved_rows`], where it can misread RGBA as RGB.
pub fn open(path: impl AsRef<Path>) -> Result<Decoded> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| StipplerError::Decode(format!("Failed to read {}: {}", path.display(), e)))?;
    from_memory(&bytes)
}

/// Decode an in-memory image.
pub fn from_memory(bytes: &[u8]) -> Result<Decoded> {
    if is_heic(bytes) {
        return decode_heic(bytes);
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| StipplerError::Decode(format!("Failed to decode image: {}", e)))?;
    from_dynamic(&image)
}

/// Convert an already-decoded `image` buffer.
pub fn from_dynamic(image: &DynamicImage) -> Result<Decoded> {
    let channels = if image.color().has_alpha() { 4 } else { 3 };
    let rgba = image.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);

    debug!(width, height, channels, "decoded image");

    let cells = rgba
        .pixels()
        .map(|p| Rgb::from_u8(p[0], p[1], p[2]))
        .collect();

    Ok(Decoded {
        pixels: Grid::from_vec(width, height, cells)?,
        channels,
    })
}

/// Guess bytes per pixel from the length of one interleaved row.
///
/// Returns 4 (RGBA) when the length is divisible by 4 but not by 3,
/// otherwise 3 (RGB). See the module docs for when this guesses wrong.
#[inline]
pub fn channel_stride(row_len: usize) -> usize {
    if row_len % 4 == 0 && row_len % 3 != 0 {
        4
    } else {
        3
    }
}

/// De-interleave raw 8-bit rows of unknown layout.
///
/// The stride is guessed once from the first row. A 4th channel, when
/// present, is dropped. Rows that do not split evenly into pixels fail with
/// [`StipplerError::Decode`]; rows that split into a different pixel count
/// fail with [`StipplerError::DimensionMismatch`].
pub fn from_interleaved_rows(rows: &[Vec<u8>]) -> Result<Grid<Rgb>> {
    let stride = rows.first().map_or(3, |row| channel_stride(row.len()));

    let mut pixels = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let chunks = row.chunks_exact(stride);
        if !chunks.remainder().is_empty() {
            return Err(StipplerError::Decode(format!(
                "Row {} has {} bytes, not a multiple of {} channels",
                index,
                row.len(),
                stride
            )));
        }
        pixels.push(chunks.map(|p| Rgb::from_u8(p[0], p[1], p[2])).collect());
    }

    Grid::from_rows(pixels)
}

/// Sniff the ISO-BMFF `ftyp` box for a HEIF-family brand.
pub fn is_heic(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }

    matches!(
        &data[8..12],
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"hevm" | b"hevs" | b"mif1" | b"msf1"
    )
}

#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<Decoded> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let heif_err = |what: &str, e: libheif_rs::HeifError| {
        StipplerError::Decode(format!("HEIC {}: {}", what, e))
    };

    let ctx = HeifContext::read_from_bytes(data).map_err(|e| heif_err("read failed", e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| heif_err("has no primary image", e))?;
    let decoded = LibHeif::new()
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| heif_err("decode failed", e))?;

    let plane = decoded
        .planes()
        .interleaved
        .ok_or_else(|| StipplerError::Decode("HEIC has no interleaved RGB plane".to_string()))?;

    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    let row_bytes = width * 3;

    // Rows are `stride` bytes apart, padded past `width * 3`
    let rows = plane
        .data
        .chunks(plane.stride.max(1))
        .take(height)
        .map(|row| {
            row.get(..row_bytes)
                .ok_or_else(|| StipplerError::Decode("HEIC row shorter than its width".to_string()))
                .map(|pixels| {
                    pixels
                        .chunks_exact(3)
                        .map(|p| Rgb::from_u8(p[0], p[1], p[2]))
                        .collect::<Vec<_>>()
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if rows.len() != height {
        return Err(StipplerError::Decode(format!(
            "HEIC plane has {} rows, expected {}",
            rows.len(),
            height
        )));
    }

    debug!(width, height, channels = 3, "decoded HEIC image");
    Ok(Decoded {
        pixels: Grid::from_rows(rows)?,
        channels: 3,
    })
}

#[cfg(not(feature = "heif"))]
fn decode_heic(_data: &[u8]) -> Result<Decoded> {
    Err(StipplerError::Decode(
        "HEIC/HEIF input requires the `heif` feature".to_string(),
    ))
}
