//! # Codec Module
//!
//! Adapters between image files and pixel grids.
//!
//! - [`decode`]: file/bytes to `Grid<Rgb>`
//! - [`encode`]: `Grid<Binary>` / `Grid<f64>` to an RGB image file

pub mod decode;
pub mod encode;

pub use decode::Decoded;
