//! Darkness level quantization.
//!
//! Splits `[0.0, 1.0]` into `n` equal buckets with upper bounds `i/n` for
//! `i = 1..=n`. A value sitting exactly on a bound belongs to the lower
//! (darker) bucket:
//!
//! ```text
//!   n = 7
//!   0      1/7     2/7     3/7     4/7     5/7     6/7      1
//!   [  0   ](  1   ](  2   ](  3   ](  4   ](  5   ](  6    ]
//! ```

use tracing::debug;

use crate::error::{Result, StipplerError};
use crate::grid::Grid;

/// Level count matching the stipple pattern table.
pub const DEFAULT_LEVELS: usize = 7;

/// Darkness level of a single gray value.
///
/// Returns the smallest `i - 1` such that `value <= i / levels`. The last
/// bucket catches everything above, so the result is always in
/// `0..levels`.
///
/// # Parameters
/// - `value`: Gray value, 0.0 = black, 1.0 = white
/// - `levels`: Number of buckets (at least 1)
///
/// ```
/// use stippler::render::quantize::level;
///
/// assert_eq!(level(0.0, 7), 0);
/// assert_eq!(level(0.5, 7), 3);
/// assert_eq!(level(1.0, 7), 6);
/// ```
#[inline]
pub fn level(value: f64, levels: usize) -> usize {
    let n = levels as f64;
    for i in 1..levels {
        if value <= i as f64 / n {
            return i - 1;
        }
    }
    levels.saturating_sub(1)
}

/// Quantize a grayscale grid into darkness levels `0..levels`.
///
/// Fails with [`StipplerError::InvalidLevelCount`] when `levels` is 0 or does
/// not fit a `u8` cell.
pub fn quantize(gray: &Grid<f64>, levels: usize) -> Result<Grid<u8>> {
    if levels == 0 || levels > usize::from(u8::MAX) + 1 {
        return Err(StipplerError::InvalidLevelCount(levels));
    }

    debug!(
        width = gray.width(),
        height = gray.height(),
        levels,
        "quantizing darkness"
    );

    // level() < levels <= 256, so the cast is lossless
    Ok(gray.map(|&v| level(v, levels) as u8))
}
