//! Gray Enhance Adapters - External adapters for gray-enhance.
//!
//! This crate provides adapters for:
//! - Filesystem image source and sink
//! - Raster decode/encode and matrix conversion

pub mod convert;
pub mod fs;

pub use convert::{matrix_from_image, matrix_to_image};
pub use fs::{load_matrix, output_path, save_matrix, FsImageSource, FsMatrixSink};
