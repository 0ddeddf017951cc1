//! Serializable per-image statistics report.

use serde::{Deserialize, Serialize};

use super::MatrixDimensions;

/// Statistics for a single image, emitted as one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (RFC 3339).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: MatrixDimensions,
    /// Color depth the image was analyzed with.
    pub depth: usize,
    /// Darkest pixel value.
    pub min: u32,
    /// Brightest pixel value.
    pub max: u32,
    /// Mean intensity.
    pub mean: f64,
    /// Standard deviation of intensity.
    pub std_dev: f64,
    /// Sum of the vertical co-occurrence matrix.
    pub contrast: u64,
    /// Intensities bounding the requested percentage window.
    pub percentile: PercentileReport,
    /// Per-intensity pixel counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<u64>>,
    /// Prefix sums of `histogram`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_histogram: Option<Vec<u64>>,
}

/// Percentile bounds as reported in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileReport {
    /// Percentage trimmed from each end of the distribution (0-100).
    pub percentage: f64,
    /// Lowest intensity inside the window.
    pub low: usize,
    /// Highest intensity inside the window.
    pub high: usize,
}
