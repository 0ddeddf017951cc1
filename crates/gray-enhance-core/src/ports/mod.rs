//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the numeric core and external adapters.

mod image_source;
mod matrix_sink;
mod progress;
mod result_output;

pub use image_source::{ImageSource, SourceImage};
pub use matrix_sink::MatrixSink;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
