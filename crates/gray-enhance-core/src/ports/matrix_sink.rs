//! Matrix sink port for persisting enhanced images.

use crate::domain::PixelMatrix;

/// Port for writing enhanced matrices.
pub trait MatrixSink: Send + Sync {
    /// Persists `matrix`, derived from the image at `source_path` by the
    /// enhancement called `operation`, and returns where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn save(&self, source_path: &str, operation: &str, matrix: &PixelMatrix)
        -> anyhow::Result<String>;
}
