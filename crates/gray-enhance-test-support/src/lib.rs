//! Test support utilities for gray-enhance.
//!
//! Provides mocks, synthetic matrix builders, and utilities for testing
//! the statistics and enhancement pipelines.
//!
//! # Example
//!
//! ```
//! use gray_enhance_test_support::{MockImageSource, SyntheticMatrixBuilder};
//!
//! // Create synthetic test matrices
//! let gradient = SyntheticMatrixBuilder::horizontal_gradient(64, 8);
//! let flat = SyntheticMatrixBuilder::uniform(16, 16, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::from_matrices(vec![gradient, flat]);
//! ```

mod builders;
mod mocks;

pub use builders::{write_gray_png, SyntheticMatrixBuilder};
pub use mocks::{MockImageSource, MockMatrixSink, MockProgressSink, MockResultOutput};
