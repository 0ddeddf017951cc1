//! Histogram equalization against a target cumulative table.

use tracing::debug;

use super::{CumulativeHistogram, Histogram};
use crate::domain::{Enhancement, PixelMatrix};
use crate::error::Result;

/// Builds `cdf[i] = cum[clamp(round(i / D * (max - min) + min))]` for every level.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn target_table(cumulative: &CumulativeHistogram, min_value: u32, max_value: u32) -> Vec<u64> {
    let depth = cumulative.depth();
    let values = cumulative.values();
    let span = f64::from(max_value) - f64::from(min_value);
    let ceiling = (depth - 1) as f64;
    (0..depth)
        .map(|i| {
            #[allow(clippy::suboptimal_flops)]
            let source = ((i as f64 / depth as f64) * span + f64::from(min_value))
                .round()
                .clamp(0.0, ceiling);
            values[source as usize]
        })
        .collect()
}

/// Smallest level whose target count reaches `count`, or the top level.
fn first_reaching(table: &[u64], count: u64, sorted: bool) -> usize {
    let found = if sorted {
        Some(table.partition_point(|&c| c < count)).filter(|&i| i < table.len())
    } else {
        table.iter().position(|&c| c >= count)
    };
    found.unwrap_or(table.len() - 1)
}

/// Equalizes a matrix so its cumulative distribution follows the image's own
/// distribution resampled over `[min_value, max_value]`.
///
/// Each pixel `v` becomes the smallest level `i` with `cdf[i] >= cum[v]`,
/// or `depth - 1` when no level qualifies. The remap is monotone
/// non-decreasing in `v`.
///
/// # Errors
///
/// Returns [`crate::EnhanceError::OutOfRangeValue`] if any pixel lies outside
/// `[0, depth - 1]`.
#[allow(clippy::cast_possible_truncation)]
pub fn equalize_histogram(
    matrix: &PixelMatrix,
    min_value: u32,
    max_value: u32,
) -> Result<PixelMatrix> {
    let cumulative = Histogram::from_matrix(matrix)?.cumulative();
    debug!(min_value, max_value, "equalizing histogram");

    let table = target_table(&cumulative, min_value, max_value);
    let sorted = table.windows(2).all(|w| w[0] <= w[1]);
    let lookup: Vec<u32> = cumulative
        .values()
        .iter()
        .map(|&count| first_reaching(&table, count, sorted) as u32)
        .collect();

    matrix.map_pixels(|_, _, value| Ok(lookup[value as usize]))
}

/// Configuration for histogram equalization.
///
/// Unset bounds default to the image's darkest and brightest pixels.
#[derive(Debug, Clone, Default)]
pub struct EqualizeConfig {
    pub min_value: Option<u32>,
    pub max_value: Option<u32>,
}

/// Histogram equalization enhancement module.
#[derive(Default)]
pub struct EqualizeModule {
    config: EqualizeConfig,
}

impl EqualizeModule {
    /// Creates a new equalization module with the given configuration.
    #[must_use]
    pub const fn new(config: EqualizeConfig) -> Self {
        Self { config }
    }
}

impl Enhancement for EqualizeModule {
    fn name(&self) -> &'static str {
        "equalize"
    }

    fn apply(&self, matrix: &PixelMatrix) -> Result<PixelMatrix> {
        let min_value = self.config.min_value.unwrap_or_else(|| matrix.min_value());
        let max_value = self.config.max_value.unwrap_or_else(|| matrix.max_value());
        equalize_histogram(matrix, min_value, max_value)
    }
}
