//! Core domain types for grayscale enhancement.

mod enhancement;
mod matrix;
mod report;

pub use enhancement::Enhancement;
pub use matrix::{MatrixDimensions, Pixel, PixelMatrix, DEFAULT_COLOR_DEPTH};
pub use report::{PercentileReport, StatsReport};
