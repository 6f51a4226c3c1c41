//! # Error Types
//!
//! This module defines error types used throughout the stippler library.
//! Every error is fatal: stages are pure and deterministic, so nothing is
//! retried and no partial output is produced.

use thiserror::Error;

/// Main error type for stippler operations
#[derive(Debug, Error)]
pub enum StipplerError {
    /// Input missing, unreadable, or not a supported raster format
    #[error("Decode error: {0}")]
    Decode(String),

    /// A grid whose rows do not all have the same length
    #[error("Dimension mismatch: row {row} has {found} cells, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A darkness level the stipple table has no pattern for
    #[error("Invalid darkness level {level} at ({row}, {col}), expected 0..=6")]
    InvalidLevel { level: i32, row: usize, col: usize },

    /// The quantizer needs 1 to 256 buckets (levels are stored as `u8`)
    #[error("Invalid level count {0}, must be in 1..=256")]
    InvalidLevelCount(usize),

    /// Output unwritable or the encoder rejected the data
    #[error("Encode error: {0}")]
    Encode(String),

    /// Configuration file unreadable or malformed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, StipplerError>;
