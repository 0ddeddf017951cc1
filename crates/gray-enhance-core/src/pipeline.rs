//! Batch drivers that run statistics or an enhancement over an image source.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Enhancement;
use crate::modules::ImageStatistics;
use crate::ports::{ImageSource, MatrixSink, ProgressEvent, ProgressSink, ResultOutput};

/// Options for [`run_stats`].
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Percentage trimmed from each end when locating percentile bounds.
    pub percentage: f64,
    /// Include histogram and cumulative histogram arrays in each report.
    pub include_histogram: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            percentage: 5.0,
            include_histogram: false,
        }
    }
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images handled successfully.
    pub processed: usize,
    /// Images that failed to load or process.
    pub skipped: usize,
}

/// One enhanced image written by [`run_enhancement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenImage {
    pub input: String,
    pub output: String,
    pub operation: String,
}

/// Result of [`run_enhancement`].
#[derive(Debug, Clone, Default)]
pub struct EnhancementSummary {
    pub batch: BatchSummary,
    pub written: Vec<WrittenImage>,
}

/// Computes statistics for every image and writes one report each.
///
/// Load and analysis failures are reported as [`ProgressEvent::Skipped`].
///
/// # Errors
///
/// Returns an error only if writing to `output` fails.
pub fn run_stats(
    source: &dyn ImageSource,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    options: &StatsOptions,
) -> Result<BatchSummary> {
    let total = source.count_hint();
    let mut summary = BatchSummary::default();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                summary.skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let stats = match ImageStatistics::analyze(&image.matrix, options.percentage) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Statistics failed for {}: {e}", image.path);
                progress.on_event(ProgressEvent::Skipped {
                    path: image.path,
                    reason: e.to_string(),
                });
                summary.skipped += 1;
                continue;
            }
        };

        let report =
            stats.into_report(image.path.clone(), iso_timestamp(), options.include_histogram);
        output.write(&report)?;

        progress.on_event(ProgressEvent::Completed { path: image.path });
        summary.processed += 1;
    }

    output.flush()?;
    progress.on_event(ProgressEvent::Finished {
        processed: summary.processed,
        skipped: summary.skipped,
    });

    Ok(summary)
}

/// Applies `enhancement` to every image and hands each result to `sink`.
///
/// Load, enhancement and save failures are reported as
/// [`ProgressEvent::Skipped`] and counted; the batch continues.
pub fn run_enhancement(
    source: &dyn ImageSource,
    enhancement: &dyn Enhancement,
    sink: &dyn MatrixSink,
    progress: &dyn ProgressSink,
) -> EnhancementSummary {
    let total = source.count_hint();
    let mut summary = EnhancementSummary::default();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                summary.batch.skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let saved = enhancement
            .apply(&image.matrix)
            .map_err(anyhow::Error::from)
            .and_then(|enhanced| sink.save(&image.path, enhancement.name(), &enhanced));

        match saved {
            Ok(output) => {
                debug!("{} -> {output}", image.path);
                summary.written.push(WrittenImage {
                    input: image.path.clone(),
                    output,
                    operation: enhancement.name().to_string(),
                });
                progress.on_event(ProgressEvent::Completed { path: image.path });
                summary.batch.processed += 1;
            }
            Err(e) => {
                warn!("{} failed for {}: {e:#}", enhancement.name(), image.path);
                progress.on_event(ProgressEvent::Skipped {
                    path: image.path,
                    reason: format!("{e:#}"),
                });
                summary.batch.skipped += 1;
            }
        }
    }

    progress.on_event(ProgressEvent::Finished {
        processed: summary.batch.processed,
        skipped: summary.batch.skipped,
    });

    summary
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
