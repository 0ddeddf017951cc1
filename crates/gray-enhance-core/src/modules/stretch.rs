//! Linear contrast stretch.
//!
//! Maps the calibration interval `[c, d]` onto `[a, b]` and clamps the result
//! to the matrix's intensity range.

use tracing::debug;

use super::{color_at_percentage, Histogram};
use crate::domain::{Enhancement, PixelMatrix};
use crate::error::{EnhanceError, Result};

/// Linearly remaps every pixel through `new = (old - c) * (b - a) / (d - c) + a`.
///
/// Results are rounded half away from zero and clamped to `[0, depth - 1]`.
///
/// # Errors
///
/// Returns [`EnhanceError::DivisionByZero`] if `c == d`, and
/// [`EnhanceError::OutOfRangeValue`] if any pixel lies outside `[0, depth - 1]`.
#[allow(
    clippy::many_single_char_names,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn contrast_stretch(
    matrix: &PixelMatrix,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
) -> Result<PixelMatrix> {
    if c == d {
        return Err(EnhanceError::DivisionByZero {
            reason: format!("contrast stretch calibration points are equal (c = d = {c})"),
        });
    }
    matrix.check_range()?;
    debug!(a, b, c, d, "applying contrast stretch");

    let ceiling = (matrix.depth() - 1) as f64;
    matrix.map_pixels(|_, _, old| {
        let new = ((f64::from(old) - c) * (b - a) / (d - c) + a).round();
        Ok(new.clamp(0.0, ceiling) as u32)
    })
}

/// How the source interval `[c, d]` of a stretch is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StretchBounds {
    /// Explicit calibration points.
    Fixed { low: f64, high: f64 },
    /// The image's darkest and brightest pixels.
    MinMax,
    /// Percentile window of the image's cumulative histogram.
    Percentile(f64),
}

/// Configuration for contrast stretching.
#[derive(Debug, Clone)]
pub struct StretchConfig {
    /// Output value for the low calibration point (`a`).
    pub low_target: f64,
    /// Output value for the high calibration point (`b`).
    pub high_target: f64,
    /// Source interval (`c`, `d`).
    pub bounds: StretchBounds,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            low_target: 0.0,
            high_target: 255.0,
            bounds: StretchBounds::Percentile(5.0),
        }
    }
}

/// Contrast stretch enhancement module.
pub struct ContrastStretchModule {
    config: StretchConfig,
}

impl ContrastStretchModule {
    /// Creates a new contrast stretch module with the given configuration.
    #[must_use]
    pub const fn new(config: StretchConfig) -> Self {
        Self { config }
    }

    /// Resolves `(c, d)` for a matrix.
    ///
    /// # Errors
    ///
    /// Propagates histogram and percentile errors.
    #[allow(clippy::cast_precision_loss)]
    pub fn source_interval(&self, matrix: &PixelMatrix) -> Result<(f64, f64)> {
        match self.config.bounds {
            StretchBounds::Fixed { low, high } => Ok((low, high)),
            StretchBounds::MinMax => Ok((
                f64::from(matrix.min_value()),
                f64::from(matrix.max_value()),
            )),
            StretchBounds::Percentile(p) => {
                let cumulative = Histogram::from_matrix(matrix)?.cumulative();
                let bounds = color_at_percentage(&cumulative, p)?;
                Ok((bounds.low as f64, bounds.high as f64))
            }
        }
    }
}

impl Default for ContrastStretchModule {
    fn default() -> Self {
        Self::new(StretchConfig::default())
    }
}

impl Enhancement for ContrastStretchModule {
    fn name(&self) -> &'static str {
        "stretch"
    }

    fn apply(&self, matrix: &PixelMatrix) -> Result<PixelMatrix> {
        let (c, d) = self.source_interval(matrix)?;
        contrast_stretch(
            matrix,
            self.config.low_target,
            self.config.high_target,
            c,
            d,
        )
    }
}
