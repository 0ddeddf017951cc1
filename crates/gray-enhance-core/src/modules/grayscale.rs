//! Three-segment piecewise-linear grayscale remap.

use tracing::debug;

use crate::domain::{Enhancement, PixelMatrix};
use crate::error::{EnhanceError, Result};

/// Remaps pixels through the polyline `(0, 0) - (x1, y1) - (x2, y2) - (D-1, D-1)`.
///
/// Values are rounded half away from zero and never clamped: a result outside
/// `[0, depth - 1]` is an error.
///
/// # Errors
///
/// Returns [`EnhanceError::DivisionByZero`] if `x1 == 0`, `x1 == x2` or
/// `x2 == depth - 1`, [`EnhanceError::OutOfRangeValue`] if an input pixel lies
/// outside `[0, depth - 1]`, and [`EnhanceError::OverflowAfterTransform`] for
/// the first pixel (row-major) mapped outside the intensity range.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn gray_scale_transformation(
    matrix: &PixelMatrix,
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
) -> Result<PixelMatrix> {
    let depth = matrix.depth();
    let top = (depth - 1) as f64;
    let (x1f, y1f, x2f, y2f) = (
        f64::from(x1),
        f64::from(y1),
        f64::from(x2),
        f64::from(y2),
    );

    if x1 == 0 {
        return Err(EnhanceError::DivisionByZero {
            reason: "first control point has x1 = 0".to_string(),
        });
    }
    if x1 == x2 {
        return Err(EnhanceError::DivisionByZero {
            reason: format!("control points share x1 = x2 = {x1}"),
        });
    }
    if (x2 as usize) == depth - 1 {
        return Err(EnhanceError::DivisionByZero {
            reason: format!("second control point has x2 = depth - 1 = {x2}"),
        });
    }
    matrix.check_range()?;
    debug!(x1, y1, x2, y2, "applying grayscale transformation");

    let s1 = y1f / x1f;
    let s2 = (y2f - y1f) / (x2f - x1f);
    let s3 = (top - y2f) / (top - x2f);

    matrix.map_pixels(|row, column, value| {
        let v = f64::from(value);
        let mapped = if value < x1 {
            s1 * v
        } else if value < x2 {
            s2 * (v - x1f) + y1f
        } else {
            s3 * (v - x2f) + y2f
        };
        let new = mapped.round();

        if (0.0..=top).contains(&new) {
            Ok(new as u32)
        } else {
            Err(EnhanceError::OverflowAfterTransform {
                row,
                column,
                value: new as i64,
                depth,
            })
        }
    })
}

/// Control points for the grayscale transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayScaleConfig {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Default for GrayScaleConfig {
    fn default() -> Self {
        Self {
            x1: 50,
            y1: 30,
            x2: 200,
            y2: 220,
        }
    }
}

/// Piecewise-linear remap enhancement module.
#[derive(Default)]
pub struct GrayScaleModule {
    config: GrayScaleConfig,
}

impl GrayScaleModule {
    /// Creates a new remap module with the given control points.
    #[must_use]
    pub const fn new(config: GrayScaleConfig) -> Self {
        Self { config }
    }
}

impl Enhancement for GrayScaleModule {
    fn name(&self) -> &'static str {
        "remap"
    }

    fn apply(&self, matrix: &PixelMatrix) -> Result<PixelMatrix> {
        let GrayScaleConfig { x1, y1, x2, y2 } = self.config;
        gray_scale_transformation(matrix, x1, y1, x2, y2)
    }
}
