//! # Pipeline Driver
//!
//! Runs the stages in order: decode, grayscale, quantize, stipple, encode.
//! The transforms themselves are pure; this module only sequences them and
//! reports progress through an optional hook.
//!
//! ## Usage Example
//!
//! ```
//! use stippler::grid::Grid;
//! use stippler::pipeline::{Pipeline, Stage};
//! use stippler::pixel::Rgb;
//!
//! let mut stages = Vec::new();
//! let mut pipeline = Pipeline::default().on_progress(|stage| stages.push(stage));
//!
//! let image = Grid::filled(16, 16, Rgb::WHITE).unwrap();
//! let binary = pipeline.process(&image).unwrap();
//! drop(pipeline);
//!
//! assert_eq!(binary.dimensions(), (16, 16));
//! assert_eq!(stages, vec![Stage::Grayscale, Stage::Quantized, Stage::Stippled]);
//! ```

use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::codec::{decode, encode};
use crate::config::StippleConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::pixel::{Binary, Rgb};
use crate::render::{luma, quantize, stipple};

/// A finished pipeline step, reported to the progress hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoded,
    Grayscale,
    Quantized,
    Stippled,
    Saved,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Decoded => "Got image",
            Stage::Grayscale => "Turned to grayscale",
            Stage::Quantized => "Quantized darkness levels",
            Stage::Stippled => "Applied stipple",
            Stage::Saved => "Saved",
        };
        f.write_str(text)
    }
}

/// Every intermediate grid of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub gray: Grid<f64>,
    pub levels: Grid<u8>,
    pub binary: Grid<Binary>,
}

/// Sequences the stages for one configuration.
pub struct Pipeline<'a> {
    config: StippleConfig,
    progress: Option<Box<dyn FnMut(Stage) + 'a>>,
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new(StippleConfig::default())
    }
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<'a> Pipeline<'a> {
    pub fn new(config: StippleConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Call `hook` after each stage completes.
    pub fn on_progress<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Stage) + 'a,
    {
        self.progress = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &StippleConfig {
        &self.config
    }

    fn report(&mut self, stage: Stage) {
        if let Some(hook) = self.progress.as_mut() {
            hook(stage);
        }
    }

    /// Run the three in-memory stages, keeping every intermediate grid.
    pub fn render(&mut self, image: &Grid<Rgb>) -> Result<Rendered> {
        let gray = luma::to_grayscale(image);
        self.report(Stage::Grayscale);

        let levels = quantize::quantize(&gray, self.config.levels)?;
        self.report(Stage::Quantized);

        let binary = if self.config.parallel {
            stipple::stipple_parallel(&levels)?
        } else {
            stipple::stipple(&levels)?
        };
        self.report(Stage::Stippled);

        Ok(Rendered {
            gray,
            levels,
            binary,
        })
    }

    /// Color grid in, binary grid out.
    pub fn process(&mut self, image: &Grid<Rgb>) -> Result<Grid<Binary>> {
        Ok(self.render(image)?.binary)
    }

    /// File to file. Writes the grayscale intermediate to `gray_output`
    /// when given.
    ///
    /// All outputs are encoded to temporary files first and only moved into
    /// place once every one of them encoded successfully, so a failing run
    /// leaves no output behind.
    ///
    /// Returns the image dimensions.
    pub fn run(
        &mut self,
        input: &Path,
        output: &Path,
        gray_output: Option<&Path>,
    ) -> Result<(usize, usize)> {
        let decoded = decode::open(input)?;
        self.report(Stage::Decoded);

        let rendered = self.render(&decoded.pixels)?;

        let binary = encode::stage_binary(output, &rendered.binary)?;
        let gray = gray_output
            .map(|path| encode::stage_gray(path, &rendered.gray))
            .transpose()?;

        let written = binary.commit()?;
        if let Some(gray) = gray
            && let Err(e) = gray.commit()
        {
            // Keep the run all-or-nothing
            if let Err(remove) = std::fs::remove_file(&written) {
                warn!(path = %written.display(), error = %remove, "failed to remove output");
            }
            return Err(e);
        }
        self.report(Stage::Saved);

        Ok(rendered.binary.dimensions())
    }
}

/// One-shot conversion with the default configuration.
pub fn stipple_image(image: &Grid<Rgb>) -> Result<Grid<Binary>> {
    Pipeline::default().process(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StipplerError;
    use pretty_assertions::assert_eq;

    fn gradient(width: usize, height: usize) -> Grid<Rgb> {
        let cells = (0..width * height)
            .map(|i| {
                let v = (i % width) as f64 / (width - 1) as f64;
                Rgb::new(v, v, v)
            })
            .collect();
        Grid::from_vec(width, height, cells).unwrap()
    }

    #[test]
    fn test_dimensions_preserved() {
        let image = gradient(29, 11);
        let rendered = Pipeline::default().render(&image).unwrap();
        assert_eq!(rendered.gray.dimensions(), (29, 11));
        assert_eq!(rendered.levels.dimensions(), (29, 11));
        assert_eq!(rendered.binary.dimensions(), (29, 11));
    }

    #[test]
    fn test_deterministic() {
        let image = gradient(40, 12);
        let first = stipple_image(&image).unwrap();
        let second = stipple_image(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let image = gradient(64, 24);
        let serial = Pipeline::new(StippleConfig {
            parallel: false,
            ..Default::default()
        })
        .process(&image)
        .unwrap();
        let parallel = Pipeline::default().process(&image).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_gradient_coverage_falls_left_to_right() {
        // Left edge is black, right edge white
        let image = gradient(70, 12);
        let binary = stipple_image(&image).unwrap();
        let black_in = |cols: std::ops::Range<usize>| {
            binary
                .rows()
                .flat_map(|row| row[cols.clone()].iter())
                .filter(|p| p.is_black())
                .count()
        };
        assert!(black_in(0..8) > black_in(31..39));
        assert!(black_in(31..39) > black_in(62..70));
        assert_eq!(black_in(66..70), 0);
    }

    #[test]
    fn test_progress_order() {
        let mut stages = Vec::new();
        {
            let mut pipeline = Pipeline::default().on_progress(|stage| stages.push(stage));
            pipeline.process(&gradient(8, 8)).unwrap();
        }
        assert_eq!(
            stages,
            vec![Stage::Grayscale, Stage::Quantized, Stage::Stippled]
        );
    }

    #[test]
    fn test_level_count_mismatch_surfaces() {
        // 8 levels puts pure white at level 7, which has no pattern
        let mut pipeline = Pipeline::new(StippleConfig {
            levels: 8,
            ..Default::default()
        });
        let result = pipeline.process(&Grid::filled(4, 4, Rgb::WHITE).unwrap());
        assert!(matches!(
            result,
            Err(StipplerError::InvalidLevel { level: 7, .. })
        ));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Decoded.to_string(), "Got image");
        assert_eq!(Stage::Saved.to_string(), "Saved");
    }
}
