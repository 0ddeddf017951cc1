//! Enhancement trait for interchangeable intensity remaps.

use super::PixelMatrix;
use crate::error::Result;

/// Trait for implementing whole-image enhancement operations.
///
/// Each implementation produces a fresh matrix of the same dimensions and
/// depth; the input is never mutated.
pub trait Enhancement: Send + Sync {
    /// Returns the name of this enhancement, used in output file names.
    fn name(&self) -> &'static str;

    /// Applies the enhancement to a matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or the configured parameters are
    /// degenerate for this operation.
    fn apply(&self, matrix: &PixelMatrix) -> Result<PixelMatrix>;
}
