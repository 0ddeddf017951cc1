//! Percentile bounds over a cumulative histogram.
//!
//! Uses the threshold policy: the window is described by intensity indices,
//! not by cumulative counts.

use tracing::debug;

use super::CumulativeHistogram;
use crate::error::{EnhanceError, Result};

/// Intensities bounding a percentage window of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileBounds {
    /// Smallest intensity whose cumulative count reaches the lower threshold.
    pub low: usize,
    /// Largest intensity whose cumulative count stays within the upper threshold.
    pub high: usize,
}

/// Finds the intensities trimming `percentage` percent of the mass from each end.
///
/// With `max = cum[D-1]`, `start = percentage/100 * max` and
/// `end = (100 - percentage)/100 * max`:
/// - `low` is the smallest index with `cum[i] >= start`, or 0 if none;
/// - `high` is the largest index with `cum[i] <= end`, or 0 if none.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidPercentage`] unless `0 <= percentage <= 100`.
#[allow(clippy::cast_precision_loss)]
pub fn color_at_percentage(
    cumulative: &CumulativeHistogram,
    percentage: f64,
) -> Result<PercentileBounds> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(EnhanceError::InvalidPercentage(percentage));
    }
    debug!(percentage, "locating percentile bounds");

    let max = cumulative.max() as f64;
    let start = percentage / 100.0 * max;
    let end = (100.0 - percentage) / 100.0 * max;
    let values = cumulative.values();

    let low = values
        .iter()
        .position(|&c| c as f64 >= start)
        .unwrap_or(0);
    let high = values
        .iter()
        .rposition(|&c| c as f64 <= end)
        .unwrap_or(0);

    Ok(PercentileBounds { low, high })
}
