//! Filesystem adapter for loading and saving grayscale images.

use anyhow::{Context, Result};
use gray_enhance_core::{ImageSource, MatrixSink, PixelMatrix, SourceImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::convert::{matrix_from_image, matrix_to_image};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Filesystem image source adapter.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    depth: usize,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    /// * `depth` - Color depth of the produced matrices
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool, depth: usize) -> Self {
        Self {
            paths,
            recursive,
            depth,
        }
    }

    /// Collects all image files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported_image(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<SourceImage>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} image files", files.len());

        let depth = self.depth;
        Box::new(files.into_iter().map(move |path| {
            let matrix = load_matrix(&path, depth)?;
            Ok(SourceImage {
                path: path.to_string_lossy().into_owned(),
                matrix,
            })
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Loads an image from the filesystem as a grayscale matrix.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded.
pub fn load_matrix(path: &Path, depth: usize) -> Result<PixelMatrix> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    matrix_from_image(&image, depth)
        .with_context(|| format!("Failed to convert image: {}", path.display()))
}

/// Encodes a matrix to `path`, choosing the format from the extension.
///
/// # Errors
///
/// Returns an error if the matrix cannot be represented or the file cannot be written.
pub fn save_matrix(matrix: &PixelMatrix, path: &Path) -> Result<()> {
    let image = matrix_to_image(matrix)?;
    image
        .save(path)
        .with_context(|| format!("Failed to write image: {}", path.display()))
}

/// Derives `<dir>/<stem>_<suffix>.<ext>` for an enhanced copy of `input`.
///
/// Without `output_dir` the copy lands next to the input.
#[must_use]
pub fn output_path(input: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}.png"),
    };
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(file_name)
}

/// Filesystem sink writing enhanced copies beside the input or into a directory.
pub struct FsMatrixSink {
    output_dir: Option<PathBuf>,
    suffix: Option<String>,
}

impl FsMatrixSink {
    /// Creates a new filesystem sink.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory receiving the files; defaults to each input's directory
    /// * `suffix` - File name suffix; defaults to the enhancement name
    #[must_use]
    pub const fn new(output_dir: Option<PathBuf>, suffix: Option<String>) -> Self {
        Self { output_dir, suffix }
    }
}

impl MatrixSink for FsMatrixSink {
    fn save(&self, source_path: &str, operation: &str, matrix: &PixelMatrix) -> Result<String> {
        if let Some(dir) = &self.output_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let suffix = self.suffix.as_deref().unwrap_or(operation);
        let path = output_path(Path::new(source_path), self.output_dir.as_deref(), suffix);
        save_matrix(matrix, &path)?;
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("test.jpg")));
        assert!(is_supported_image(Path::new("test.JPEG")));
        assert!(is_supported_image(Path::new("test.png")));
        assert!(is_supported_image(Path::new("test.TIF")));
        assert!(!is_supported_image(Path::new("test.cr2")));
        assert!(!is_supported_image(Path::new("test.txt")));
        assert!(!is_supported_image(Path::new("test")));
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path(Path::new("shots/0001.jpg"), None, "equalize");
        assert_eq!(path, PathBuf::from("shots/0001_equalize.jpg"));
    }

    #[test]
    fn test_output_path_in_directory() {
        let path = output_path(Path::new("shots/0001.png"), Some(Path::new("out")), "stretch");
        assert_eq!(path, PathBuf::from("out/0001_stretch.png"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let path = output_path(Path::new("raw"), None, "remap");
        assert_eq!(path, PathBuf::from("raw_remap.png"));
    }
}
