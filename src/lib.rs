//! # Stippler - 1-bit Halftone Renderer
//!
//! Stippler converts full-color images into pure black/white images that
//! keep the impression of gray through fixed stipple patterns. It provides:
//!
//! - **Luminance**: BT.601 grayscale conversion
//! - **Quantization**: grayscale to seven darkness levels
//! - **Stippling**: one hand-tuned positional pattern per level
//! - **Codec adapters**: decoding and encoding through the `image` crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use stippler::{codec::encode, pipeline::Pipeline};
//!
//! let input = Path::new("photo.png");
//! let output = encode::output_path(input, encode::DEFAULT_SUFFIX);
//!
//! let mut pipeline = Pipeline::default().on_progress(|stage| println!("{}", stage));
//! pipeline.run(input, &output, None)?;
//!
//! # Ok::<(), stippler::error::StipplerError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`grid`] | Rectangular pixel grid shared by all stages |
//! | [`pixel`] | Pixel types (RGB, binary) |
//! | [`render`] | Luminance, quantization and stipple transforms |
//! | [`codec`] | Image decoding and encoding |
//! | [`pipeline`] | Stage sequencing and progress reporting |
//! | [`config`] | Run configuration |
//! | [`error`] | Error types |

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod pixel;
pub mod render;

// Re-exports for convenience
pub use config::StippleConfig;
pub use error::StipplerError;
pub use grid::Grid;
pub use pipeline::Pipeline;
pub use pixel::{Binary, Rgb};
pub use render::stipple::Darkness;
