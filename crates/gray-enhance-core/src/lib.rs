//! Gray Enhance Core - numeric transforms for grayscale images
//!
//! This crate contains the pixel-matrix domain types, the error taxonomy,
//! histogram and co-occurrence analysis, percentile lookup, and the
//! intensity remaps (contrast stretch, histogram equalization, piecewise
//! grayscale transformation). Decoding and encoding live behind the ports.

pub mod domain;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use domain::{
    Enhancement, MatrixDimensions, PercentileReport, Pixel, PixelMatrix, StatsReport,
    DEFAULT_COLOR_DEPTH,
};
pub use error::{EnhanceError, Result};
pub use modules::{
    color_at_percentage, compute_contrast, contrast_stretch, equalize_histogram,
    gray_scale_transformation, CoOccurrenceMatrix, ContrastStretchModule, CumulativeHistogram,
    EqualizeConfig, EqualizeModule, GrayScaleConfig, GrayScaleModule, Histogram,
    ImageStatistics, PercentileBounds, StretchBounds, StretchConfig,
};
pub use pipeline::{
    run_enhancement, run_stats, BatchSummary, EnhancementSummary, StatsOptions, WrittenImage,
};
pub use ports::{
    ImageSource, MatrixSink, ProgressEvent, ProgressSink, ResultOutput, SourceImage,
};
