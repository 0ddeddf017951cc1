//! Numeric transforms over pixel matrices.
//!
//! Histogram, co-occurrence and percentile analysis feed the enhancement
//! modules, each of which implements the `Enhancement` trait.

mod cooccurrence;
mod equalize;
mod grayscale;
mod histogram;
mod percentile;
mod statistics;
mod stretch;

pub use cooccurrence::{compute_contrast, CoOccurrenceMatrix};
pub use equalize::{equalize_histogram, EqualizeConfig, EqualizeModule};
pub use grayscale::{gray_scale_transformation, GrayScaleConfig, GrayScaleModule};
pub use histogram::{CumulativeHistogram, Histogram};
pub use percentile::{color_at_percentage, PercentileBounds};
pub use statistics::ImageStatistics;
pub use stretch::{contrast_stretch, ContrastStretchModule, StretchBounds, StretchConfig};
