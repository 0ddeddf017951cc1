//! Vertical gray-level co-occurrence matrix and the contrast derived from it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::PixelMatrix;
use crate::error::Result;

/// `depth x depth` counts of vertically adjacent value pairs.
///
/// Each adjacent pair is counted from both endpoints, so `m[a][b]` and
/// `m[b][a]` both grow for an `a` above `b`. Only non-zero cells are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoOccurrenceMatrix {
    depth: usize,
    counts: BTreeMap<(usize, usize), u64>,
}

impl CoOccurrenceMatrix {
    /// Counts north-south neighbours of every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnhanceError::OutOfRangeValue`] if any pixel lies
    /// outside `[0, depth - 1]`.
    pub fn from_matrix(matrix: &PixelMatrix) -> Result<Self> {
        debug!(
            width = matrix.width(),
            height = matrix.height(),
            depth = matrix.depth(),
            "computing co-occurrence matrix"
        );
        matrix.check_range()?;

        let mut counts = BTreeMap::new();
        let rows: Vec<&[u32]> = matrix.rows().collect();
        for pair in rows.windows(2) {
            for (&above, &below) in pair[0].iter().zip(pair[1]) {
                let (above, below) = (above as usize, below as usize);
                *counts.entry((above, below)).or_insert(0) += 1;
                *counts.entry((below, above)).or_insert(0) += 1;
            }
        }
        Ok(Self {
            depth: matrix.depth(),
            counts,
        })
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Count for the pair `(a, b)`; zero outside the matrix.
    #[must_use]
    pub fn get(&self, a: usize, b: usize) -> u64 {
        self.counts.get(&(a, b)).copied().unwrap_or(0)
    }

    /// Returns one dense row `m[a][..]`, or `None` past the last level.
    #[must_use]
    pub fn row(&self, a: usize) -> Option<Vec<u64>> {
        if a >= self.depth {
            return None;
        }
        let mut row = vec![0; self.depth];
        for (&(_, b), &count) in self.counts.range((a, 0)..=(a, usize::MAX)) {
            row[b] = count;
        }
        Some(row)
    }

    /// Non-zero cells as `((a, b), count)` in row-major order.
    pub fn nonzero(&self) -> impl Iterator<Item = ((usize, usize), u64)> + '_ {
        self.counts.iter().map(|(&cell, &count)| (cell, count))
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Contrast of a raw matrix: the unweighted sum of its co-occurrence matrix.
///
/// Always derived through [`CoOccurrenceMatrix::from_matrix`].
///
/// # Errors
///
/// Propagates [`crate::EnhanceError::OutOfRangeValue`] from the co-occurrence step.
pub fn compute_contrast(matrix: &PixelMatrix) -> Result<u64> {
    let co_occurrence = CoOccurrenceMatrix::from_matrix(matrix)?;
    debug!("computing contrast");
    Ok(co_occurrence.total())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::EnhanceError;

    fn matrix(rows: Vec<Vec<u32>>) -> PixelMatrix {
        PixelMatrix::from_rows(rows, 256).expect("valid matrix")
    }

    #[test]
    fn test_constant_2x2() {
        let m = matrix(vec![vec![10, 10], vec![10, 10]]);
        let co = CoOccurrenceMatrix::from_matrix(&m).expect("in range");
        assert_eq!(co.get(10, 10), 4);
        assert_eq!(co.total(), 4);
        assert_eq!(compute_contrast(&m).expect("in range"), 4);
    }

    #[test]
    fn test_pairs_counted_both_directions() {
        let m = matrix(vec![vec![1, 2], vec![3, 4]]);
        let co = CoOccurrenceMatrix::from_matrix(&m).expect("in range");
        assert_eq!(co.get(1, 3), 1);
        assert_eq!(co.get(3, 1), 1);
        assert_eq!(co.get(2, 4), 1);
        assert_eq!(co.get(4, 2), 1);
        // Horizontal neighbours are not counted
        assert_eq!(co.get(1, 2), 0);
        assert_eq!(co.total(), 4);
    }

    #[test]
    fn test_total_matches_adjacent_pair_count() {
        for (height, width) in [(1usize, 5usize), (2, 3), (5, 1), (6, 9)] {
            let rows: Vec<Vec<u32>> = (0..height)
                .map(|y| {
                    (0..width)
                        .map(|x| u32::try_from((x * 7 + y * 13) % 256).unwrap())
                        .collect()
                })
                .collect();
            let m = matrix(rows);
            let co = CoOccurrenceMatrix::from_matrix(&m).expect("in range");
            let expected = 2 * (height as u64 - 1) * width as u64;
            assert_eq!(co.total(), expected, "{height}x{width}");
            assert_eq!(compute_contrast(&m).expect("in range"), co.total());
        }
    }

    #[test]
    fn test_single_row_has_zero_contrast() {
        let m = matrix(vec![vec![0, 128, 255]]);
        assert_eq!(compute_contrast(&m).expect("in range"), 0);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let m = matrix(vec![vec![0, 5, 9], vec![5, 9, 0], vec![9, 0, 5]]);
        let co = CoOccurrenceMatrix::from_matrix(&m).expect("in range");
        for a in 0..10 {
            for b in 0..10 {
                assert_eq!(co.get(a, b), co.get(b, a), "m[{a}][{b}]");
            }
        }
        let row = co.row(5).expect("row");
        assert_eq!(row.len(), 256);
        assert_eq!(row[9], co.get(5, 9));
        assert!(co.row(256).is_none());
    }

    #[test]
    fn test_sixteen_bit_depth_stays_sparse() {
        let m = PixelMatrix::from_rows(vec![vec![0, 65535], vec![65535, 0]], 65536)
            .expect("shape");
        let co = CoOccurrenceMatrix::from_matrix(&m).expect("in range");
        assert_eq!(co.get(0, 65535), 2);
        assert_eq!(co.get(65535, 0), 2);
        assert_eq!(co.nonzero().count(), 2);
        assert_eq!(co.total(), 4);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let m = PixelMatrix::from_rows(vec![vec![0], vec![4]], 4).expect("shape");
        assert!(matches!(
            compute_contrast(&m),
            Err(EnhanceError::OutOfRangeValue { row: 1, column: 0, value: 4, depth: 4 })
        ));
    }
}
