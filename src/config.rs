//! # Stipple Configuration
//!
//! Settings for a pipeline run. Every field has a default, so a config file
//! only needs the values it changes:
//!
//! ```json
//! { "suffix": "_1bit", "parallel": false }
//! ```
//!
//! ## Usage
//!
//! ```
//! use stippler::config::StippleConfig;
//!
//! let config = StippleConfig::default();
//! assert_eq!(config.levels, 7);
//! assert_eq!(config.suffix, "_shaded");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::encode::DEFAULT_SUFFIX;
use crate::error::{Result, StipplerError};
use crate::render::quantize::DEFAULT_LEVELS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StippleConfig {
    /// Darkness levels produced by the quantizer. The stipple table covers
    /// exactly 7; other values only make sense for library callers that
    /// stop after quantization.
    pub levels: usize,

    /// Inserted before the extension of the default output path
    pub suffix: String,

    /// Split stippling across the rayon thread pool
    pub parallel: bool,
}

impl Default for StippleConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            suffix: DEFAULT_SUFFIX.to_string(),
            parallel: true,
        }
    }
}

impl StippleConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StipplerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| StipplerError::Config(e.to_string()))
    }
}
