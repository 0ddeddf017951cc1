//! Grayscale pixel matrix.

use serde::{Deserialize, Serialize};

use crate::error::{EnhanceError, Result};

/// Number of intensity levels in 8-bit grayscale imagery.
pub const DEFAULT_COLOR_DEPTH: usize = 256;

/// A single grayscale intensity.
pub type Pixel = u32;

/// Rectangular, row-major matrix of grayscale pixels with a fixed color depth.
///
/// Construction checks the shape only. Operations that index by pixel value
/// (histogram, co-occurrence) report out-of-range values themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<Pixel>,
}

/// Matrix dimensions as reported in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDimensions {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl PixelMatrix {
    /// Creates a matrix from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::DimensionMismatch`] if either dimension is zero
    /// or `data.len() != width * height`, and [`EnhanceError::InvalidDepth`]
    /// if `depth < 2`.
    pub fn new(width: usize, height: usize, depth: usize, data: Vec<Pixel>) -> Result<Self> {
        if depth < 2 {
            return Err(EnhanceError::InvalidDepth(depth));
        }
        if width == 0 || height == 0 {
            return Err(EnhanceError::DimensionMismatch {
                reason: format!("matrix must be non-empty, got {width}x{height}"),
            });
        }
        if data.len() != width * height {
            return Err(EnhanceError::DimensionMismatch {
                reason: format!(
                    "buffer holds {} pixels, expected {width}x{height} = {}",
                    data.len(),
                    width * height
                ),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    /// Creates a matrix from a sequence of rows.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::DimensionMismatch`] for an empty matrix or rows
    /// of unequal length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>, depth: usize) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(EnhanceError::DimensionMismatch {
                reason: format!(
                    "row {index} has {} pixels, expected {width}",
                    row.len()
                ),
            });
        }
        let data = rows.into_iter().flatten().collect();
        Self::new(width, height, depth, data)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the color depth `D`; valid pixels lie in `[0, D - 1]`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn dimensions(&self) -> MatrixDimensions {
        MatrixDimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: a constructed matrix has at least one pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the pixel at `(row, column)`, if inside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Pixel> {
        if row < self.height && column < self.width {
            Some(self.data[row * self.width + column])
        } else {
            None
        }
    }

    /// Returns one row as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Pixel]> {
        let start = row.checked_mul(self.width)?;
        self.data.get(start..start + self.width)
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        self.data.chunks_exact(self.width)
    }

    /// Row-major pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.data
    }

    #[must_use]
    pub fn min_value(&self) -> Pixel {
        self.data.iter().copied().min().unwrap_or(0)
    }

    #[must_use]
    pub fn max_value(&self) -> Pixel {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Fails on the first pixel (row-major) outside `[0, depth - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::OutOfRangeValue`] naming the pixel.
    pub fn check_range(&self) -> Result<()> {
        match self
            .data
            .iter()
            .position(|&v| usize::try_from(v).map_or(true, |v| v >= self.depth))
        {
            Some(index) => Err(EnhanceError::OutOfRangeValue {
                row: index / self.width,
                column: index % self.width,
                value: self.data[index],
                depth: self.depth,
            }),
            None => Ok(()),
        }
    }

    /// Builds a new matrix of the same shape and depth by mapping every pixel.
    ///
    /// The closure receives `(row, column, value)`; the first error aborts.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `f`.
    pub fn map_pixels<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, Pixel) -> Result<Pixel>,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i / self.width, i % self.width, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { data, ..*self })
    }
}
