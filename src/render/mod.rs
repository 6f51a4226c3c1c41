//! # Rendering Module
//!
//! The three pure transforms between a decoded image and a binary one.
//!
//! ## Modules
//!
//! - [`luma`]: RGB to grayscale (BT.601 weights)
//! - [`quantize`]: grayscale to integer darkness levels
//! - [`stipple`]: darkness levels to black/white stipple patterns
//!
//! ## Usage Example
//!
//! ```
//! use stippler::grid::Grid;
//! use stippler::pixel::{Binary, Rgb};
//! use stippler::render::{luma, quantize, stipple};
//!
//! let image = Grid::filled(8, 4, Rgb::new(0.5, 0.5, 0.5)).unwrap();
//!
//! let gray = luma::to_grayscale(&image);
//! let levels = quantize::quantize(&gray, quantize::DEFAULT_LEVELS).unwrap();
//! let binary = stipple::stipple(&levels).unwrap();
//!
//! // Mid gray lands on the checkerboard level
//! assert_eq!(binary.get(0, 0), Some(&Binary::Black));
//! assert_eq!(binary.get(0, 1), Some(&Binary::White));
//! ```

pub mod luma;
pub mod quantize;
pub mod stipple;
