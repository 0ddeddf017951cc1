//! Image source port for loading matrices from various sources.

use crate::domain::PixelMatrix;

/// A decoded grayscale image and where it came from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Path or URI of the image.
    pub path: String,
    /// Decoded pixels.
    pub matrix: PixelMatrix,
}

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image fails to load.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourceImage>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
