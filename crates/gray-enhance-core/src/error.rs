//! Error taxonomy for the enhancement core.

use thiserror::Error;

/// Errors produced by the numeric transforms.
///
/// Every variant identifies the offending index or value so callers can
/// report it without re-scanning the input.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhanceError {
    /// A pixel value lies outside `[0, depth - 1]`.
    #[error("pixel value {value} at row {row}, column {column} is outside 0..{depth}")]
    OutOfRangeValue {
        row: usize,
        column: usize,
        value: u32,
        depth: usize,
    },

    /// Degenerate calibration or control points.
    #[error("division by zero: {reason}")]
    DivisionByZero { reason: String },

    /// Empty matrix, ragged rows, or a buffer of the wrong length.
    #[error("dimension mismatch: {reason}")]
    DimensionMismatch { reason: String },

    /// A remapped pixel would land outside `[0, depth - 1]`.
    #[error("transformed value {value} at row {row}, column {column} is outside 0..{depth}")]
    OverflowAfterTransform {
        row: usize,
        column: usize,
        value: i64,
        depth: usize,
    },

    #[error("percentage {0} is outside 0..=100")]
    InvalidPercentage(f64),

    #[error("color depth must be at least 2, got {0}")]
    InvalidDepth(usize),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, EnhanceError>;
