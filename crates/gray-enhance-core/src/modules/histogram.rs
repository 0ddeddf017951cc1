//! Intensity histogram and its cumulative form.

use tracing::debug;

use crate::domain::PixelMatrix;
use crate::error::{EnhanceError, Result};

/// One bin per intensity level; `bins[v]` counts pixels with value `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Counts every pixel of the matrix into `depth` bins.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::OutOfRangeValue`] for the first pixel outside
    /// `[0, depth - 1]`.
    pub fn from_matrix(matrix: &PixelMatrix) -> Result<Self> {
        debug!(
            width = matrix.width(),
            height = matrix.height(),
            depth = matrix.depth(),
            "computing histogram"
        );
        let depth = matrix.depth();
        let mut bins = vec![0u64; depth];
        for (row, values) in matrix.rows().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                let bin = usize::try_from(value)
                    .ok()
                    .and_then(|v| bins.get_mut(v))
                    .ok_or(EnhanceError::OutOfRangeValue {
                        row,
                        column,
                        value,
                        depth,
                    })?;
                *bin += 1;
            }
        }
        let total = bins.iter().sum();
        Ok(Self { bins, total })
    }

    /// Wraps precomputed bin counts.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::InvalidDepth`] if fewer than two bins are given.
    pub fn from_bins(bins: Vec<u64>) -> Result<Self> {
        if bins.len() < 2 {
            return Err(EnhanceError::InvalidDepth(bins.len()));
        }
        let total = bins.iter().sum();
        Ok(Self { bins, total })
    }

    #[must_use]
    pub fn bins(&self) -> &[u64] {
        &self.bins
    }

    #[must_use]
    pub fn into_bins(self) -> Vec<u64> {
        self.bins
    }

    /// Number of bins (the color depth).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.bins.len()
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Count for a single intensity, zero outside the bin range.
    #[must_use]
    pub fn count(&self, value: usize) -> u64 {
        self.bins.get(value).copied().unwrap_or(0)
    }

    /// Prefix sum over the bins.
    #[must_use]
    pub fn cumulative(&self) -> CumulativeHistogram {
        CumulativeHistogram::from_histogram(self)
    }

    /// Calculate mean intensity.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Calculate standard deviation of intensity.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let variance: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64);
        variance.sqrt()
    }
}

/// Monotone prefix sums of a [`Histogram`]; the last entry is the pixel count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeHistogram {
    values: Vec<u64>,
}

impl CumulativeHistogram {
    /// Left-to-right prefix sum over the bins. O(depth).
    #[must_use]
    pub fn from_histogram(histogram: &Histogram) -> Self {
        debug!(depth = histogram.depth(), "computing cumulative histogram");
        let values = histogram
            .bins()
            .iter()
            .scan(0u64, |acc, &count| {
                *acc += count;
                Some(*acc)
            })
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<u64> {
        self.values
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Pixels at or below `value`; `None` outside the bin range.
    #[must_use]
    pub fn get(&self, value: usize) -> Option<u64> {
        self.values.get(value).copied()
    }

    /// Largest cumulative value, equal to the total pixel count.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.values.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<u32>>) -> PixelMatrix {
        PixelMatrix::from_rows(rows, 256).expect("valid matrix")
    }

    #[test]
    fn test_constant_2x2_histogram() {
        let hist = Histogram::from_matrix(&matrix(vec![vec![10, 10], vec![10, 10]]))
            .expect("in range");

        assert_eq!(hist.depth(), 256);
        assert_eq!(hist.count(10), 4);
        assert_eq!(hist.bins().iter().filter(|&&c| c != 0).count(), 1);

        let cum = hist.cumulative();
        for (v, &c) in cum.values().iter().enumerate() {
            let expected = if v < 10 { 0 } else { 4 };
            assert_eq!(c, expected, "cum[{v}]");
        }
    }

    #[test]
    fn test_histogram_sum_matches_pixel_count() {
        let rows: Vec<Vec<u32>> = (0..7)
            .map(|y| (0..13).map(|x| (x * 31 + y * 17) % 256).collect())
            .collect();
        let hist = Histogram::from_matrix(&matrix(rows)).expect("in range");
        assert_eq!(hist.total(), 7 * 13);
        assert_eq!(hist.bins().iter().sum::<u64>(), 7 * 13);
    }

    #[test]
    fn test_histogram_from_uniform() {
        let rows = vec![(0..256).collect::<Vec<u32>>()];
        let hist = Histogram::from_matrix(&matrix(rows)).expect("in range");
        assert_eq!(hist.total(), 256);
        assert!(hist.bins().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_out_of_range_pixel_fails() {
        let m = PixelMatrix::from_rows(vec![vec![0, 1, 2], vec![3, 4, 8]], 8).expect("shape");
        let err = Histogram::from_matrix(&m).unwrap_err();
        assert_eq!(
            err,
            EnhanceError::OutOfRangeValue {
                row: 1,
                column: 2,
                value: 8,
                depth: 8,
            }
        );
    }

    #[test]
    fn test_custom_depth() {
        let m = PixelMatrix::from_rows(vec![vec![0, 15], vec![15, 15]], 16).expect("shape");
        let hist = Histogram::from_matrix(&m).expect("in range");
        assert_eq!(hist.depth(), 16);
        assert_eq!(hist.count(15), 3);
        assert_eq!(hist.cumulative().max(), 4);
    }

    #[test]
    fn test_cumulative_is_monotone_and_ends_at_total() {
        let hist = Histogram::from_bins(vec![3, 0, 5, 1, 0, 0, 7, 2]).expect("bins");
        let cum = hist.cumulative();
        assert_eq!(cum.values(), &[3, 3, 8, 9, 9, 9, 16, 18]);
        assert!(cum.values().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(cum.max(), hist.total());
        assert_eq!(cum.get(0), Some(3));
        assert_eq!(cum.get(8), None);
    }

    #[test]
    fn test_from_bins_rejects_degenerate_depth() {
        assert_eq!(Histogram::from_bins(vec![4]), Err(EnhanceError::InvalidDepth(1)));
    }

    #[test]
    fn test_mean_and_std_dev() {
        let m = matrix(vec![vec![100; 10]; 10]);
        let hist = Histogram::from_matrix(&m).expect("in range");
        assert!((hist.mean() - 100.0).abs() < f64::EPSILON);
        assert!(hist.std_dev().abs() < f64::EPSILON);

        let m = matrix(vec![vec![0, 255]]);
        let hist = Histogram::from_matrix(&m).expect("in range");
        assert!((hist.mean() - 127.5).abs() < 1e-9);
        assert!((hist.std_dev() - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_histogram_statistics() {
        let hist = Histogram::from_bins(vec![0; 256]).expect("bins");
        assert_eq!(hist.total(), 0);
        assert!(hist.mean().abs() < f64::EPSILON);
        assert!(hist.std_dev().abs() < f64::EPSILON);
        assert_eq!(hist.cumulative().max(), 0);
    }
}
