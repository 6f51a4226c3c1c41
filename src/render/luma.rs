//! Luminance conversion.
//!
//! Weighted sum of red, green and blue using the ITU-R BT.601 luma weights.

use tracing::debug;

use crate::grid::Grid;
use crate::pixel::Rgb;

/// BT.601 red weight
pub const RED_WEIGHT: f64 = 0.299;
/// BT.601 green weight
pub const GREEN_WEIGHT: f64 = 0.587;
/// BT.601 blue weight
pub const BLUE_WEIGHT: f64 = 0.114;

/// Luminance of a single pixel.
///
/// Values above 1.0 (rounding, or unnormalized input) are clamped to 1.0.
/// There is no lower clamp; inputs are expected to be non-negative.
///
/// ```
/// use stippler::pixel::Rgb;
/// use stippler::render::luma::luma;
///
/// assert_eq!(luma(Rgb::BLACK), 0.0);
/// assert!((luma(Rgb::new(1.0, 0.0, 0.0)) - 0.299).abs() < 1e-12);
/// ```
#[inline]
pub fn luma(rgb: Rgb) -> f64 {
    let value = RED_WEIGHT * rgb.r + GREEN_WEIGHT * rgb.g + BLUE_WEIGHT * rgb.b;
    if value > 1.0 { 1.0 } else { value }
}

/// Convert a color grid to a grayscale grid of the same dimensions.
pub fn to_grayscale(image: &Grid<Rgb>) -> Grid<f64> {
    debug!(
        width = image.width(),
        height = image.height(),
        "converting to grayscale"
    );
    image.map(|&rgb| luma(rgb))
}
