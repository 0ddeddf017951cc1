//! Per-image statistics: histogram summary, contrast and percentile window.

use super::{color_at_percentage, compute_contrast, CumulativeHistogram, Histogram, PercentileBounds};
use crate::domain::{MatrixDimensions, PercentileReport, PixelMatrix, StatsReport};
use crate::error::Result;

/// Statistics computed for one matrix.
#[derive(Debug, Clone)]
pub struct ImageStatistics {
    pub dimensions: MatrixDimensions,
    pub depth: usize,
    pub histogram: Histogram,
    pub cumulative: CumulativeHistogram,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub std_dev: f64,
    /// Sum of the vertical co-occurrence matrix.
    pub contrast: u64,
    /// Percentage the bounds were located for.
    pub percentage: f64,
    pub bounds: PercentileBounds,
}

impl ImageStatistics {
    /// Analyze a matrix, locating the window that trims `percentage` from each end.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-range pixels or an invalid percentage.
    pub fn analyze(matrix: &PixelMatrix, percentage: f64) -> Result<Self> {
        let histogram = Histogram::from_matrix(matrix)?;
        let cumulative = histogram.cumulative();
        let bounds = color_at_percentage(&cumulative, percentage)?;
        let contrast = compute_contrast(matrix)?;

        Ok(Self {
            dimensions: matrix.dimensions(),
            depth: matrix.depth(),
            min: matrix.min_value(),
            max: matrix.max_value(),
            mean: histogram.mean(),
            std_dev: histogram.std_dev(),
            histogram,
            cumulative,
            contrast,
            percentage,
            bounds,
        })
    }

    /// Converts into the JSON report, optionally carrying the histogram arrays.
    #[must_use]
    pub fn into_report(self, path: String, timestamp: String, include_histogram: bool) -> StatsReport {
        let (histogram, cumulative_histogram) = if include_histogram {
            (
                Some(self.histogram.into_bins()),
                Some(self.cumulative.into_values()),
            )
        } else {
            (None, None)
        };

        StatsReport {
            path,
            timestamp,
            dimensions: self.dimensions,
            depth: self.depth,
            min: self.min,
            max: self.max,
            mean: self.mean,
            std_dev: self.std_dev,
            contrast: self.contrast,
            percentile: PercentileReport {
                percentage: self.percentage,
                low: self.bounds.low,
                high: self.bounds.high,
            },
            histogram,
            cumulative_histogram,
        }
    }
}
