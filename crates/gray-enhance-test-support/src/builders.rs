//! Synthetic matrix builders for testing.

use std::path::Path;

use gray_enhance_core::{Pixel, PixelMatrix, DEFAULT_COLOR_DEPTH};
use image::{GrayImage, Luma};

/// Builder for creating synthetic 8-bit test matrices.
///
/// Provides convenience methods for generating matrices with specific
/// intensity distributions (flat, low-contrast, bimodal, etc.).
pub struct SyntheticMatrixBuilder;

impl SyntheticMatrixBuilder {
    fn build(width: usize, height: usize, f: impl Fn(usize, usize) -> Pixel) -> PixelMatrix {
        let data = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        match PixelMatrix::new(width, height, DEFAULT_COLOR_DEPTH, data) {
            Ok(m) => m,
            Err(e) => panic!("synthetic matrix {width}x{height} is invalid: {e}"),
        }
    }

    // === Flat Images ===

    /// Creates a matrix where every pixel has `value`.
    #[must_use]
    pub fn uniform(width: usize, height: usize, value: Pixel) -> PixelMatrix {
        Self::build(width, height, |_, _| value)
    }

    /// Creates a 1x1 matrix (edge case).
    #[must_use]
    pub fn single_pixel(value: Pixel) -> PixelMatrix {
        Self::uniform(1, 1, value)
    }

    // === Gradients ===

    /// Creates a left-to-right ramp covering `[0, 255]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: usize, height: usize) -> PixelMatrix {
        Self::build(width, height, |_, col| {
            ((255 * col) / width.saturating_sub(1).max(1)) as Pixel
        })
    }

    /// Creates a left-to-right ramp squeezed into `[low, high]`.
    ///
    /// Useful for exercising contrast stretch on a washed-out image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn low_contrast(width: usize, height: usize, low: Pixel, high: Pixel) -> PixelMatrix {
        let span = high.saturating_sub(low) as usize;
        Self::build(width, height, |_, col| {
            low + ((span * col) / width.saturating_sub(1).max(1)) as Pixel
        })
    }

    // === Patterns ===

    /// Creates alternating rows of `dark` and `light` (maximal vertical change).
    #[must_use]
    pub fn horizontal_bars(width: usize, height: usize, dark: Pixel, light: Pixel) -> PixelMatrix {
        Self::build(width, height, |row, _| if row % 2 == 0 { dark } else { light })
    }

    /// Creates a checkerboard of 0 and 255 with `cell`-sized squares.
    #[must_use]
    pub fn checkerboard(width: usize, height: usize, cell: usize) -> PixelMatrix {
        let cell = cell.max(1);
        Self::build(width, height, |row, col| {
            if (row / cell + col / cell) % 2 == 0 {
                255
            } else {
                0
            }
        })
    }

    /// Creates a matrix whose left half is `dark` and right half is `light`.
    #[must_use]
    pub fn bimodal(width: usize, height: usize, dark: Pixel, light: Pixel) -> PixelMatrix {
        Self::build(width, height, |_, col| if col < width / 2 { dark } else { light })
    }

    /// Creates a 256x`rows` matrix holding every 8-bit level once per row.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn every_level(rows: usize) -> PixelMatrix {
        Self::build(DEFAULT_COLOR_DEPTH, rows, |_, col| col as Pixel)
    }
}

/// Writes an 8-bit matrix to `path` as a grayscale PNG.
///
/// # Panics
///
/// Panics if a pixel exceeds 255 or the file cannot be written.
#[allow(clippy::cast_possible_truncation)]
pub fn write_gray_png(matrix: &PixelMatrix, path: &Path) {
    let width = u32::try_from(matrix.width()).unwrap_or(u32::MAX);
    let height = u32::try_from(matrix.height()).unwrap_or(u32::MAX);
    let img = GrayImage::from_fn(width, height, |x, y| {
        let value = matrix.get(y as usize, x as usize).unwrap_or(0);
        match u8::try_from(value) {
            Ok(v) => Luma([v]),
            Err(_) => panic!("pixel {value} does not fit 8-bit grayscale"),
        }
    });
    if let Err(e) = img.save(path) {
        panic!("failed to write {}: {e}", path.display());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let m = SyntheticMatrixBuilder::uniform(5, 4, 100);
        assert_eq!((m.width(), m.height()), (5, 4));
        assert!(m.pixels().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_gradient_range() {
        let m = SyntheticMatrixBuilder::horizontal_gradient(256, 2);
        assert_eq!(m.min_value(), 0);
        assert_eq!(m.max_value(), 255);
    }

    #[test]
    fn test_low_contrast_range() {
        let m = SyntheticMatrixBuilder::low_contrast(11, 3, 100, 150);
        assert_eq!(m.min_value(), 100);
        assert_eq!(m.max_value(), 150);
        assert_eq!(m.get(0, 5), Some(125));
    }

    #[test]
    fn test_checkerboard_pattern() {
        let m = SyntheticMatrixBuilder::checkerboard(16, 16, 8);
        assert_eq!(m.get(0, 0), Some(255));
        assert_eq!(m.get(0, 8), Some(0));
        assert_eq!(m.get(8, 8), Some(255));
    }

    #[test]
    fn test_bars_and_bimodal() {
        let bars = SyntheticMatrixBuilder::horizontal_bars(3, 4, 10, 20);
        assert_eq!(bars.row(1), Some(&[20, 20, 20][..]));

        let bimodal = SyntheticMatrixBuilder::bimodal(4, 1, 100, 110);
        assert_eq!(bimodal.pixels(), &[100, 100, 110, 110]);
    }

    #[test]
    fn test_every_level() {
        let m = SyntheticMatrixBuilder::every_level(2);
        assert_eq!(m.width(), 256);
        assert_eq!(m.get(1, 200), Some(200));
    }

    #[test]
    fn test_write_gray_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        let m = SyntheticMatrixBuilder::horizontal_bars(4, 4, 0, 255);

        write_gray_png(&m, &path);
        let back = image::open(&path).unwrap().to_luma8();
        assert_eq!(back.get_pixel(0, 1).0[0], 255);
    }
}
