//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use gray_enhance_core::{
    ImageSource, MatrixSink, PixelMatrix, ProgressEvent, ProgressSink, ResultOutput, SourceImage,
    StatsReport,
};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images, optionally interleaved with load failures, and
/// tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<Result<SourceImage, String>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<SourceImage>) -> Self {
        Self::with_results(images.into_iter().map(Ok).collect())
    }

    /// Creates a source where `Err` entries simulate images that fail to load.
    #[must_use]
    pub fn with_results(images: Vec<Result<SourceImage, String>>) -> Self {
        Self {
            images,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Wraps bare matrices, naming them `synthetic://<index>`.
    #[must_use]
    pub fn from_matrices(matrices: Vec<PixelMatrix>) -> Self {
        Self::new(
            matrices
                .into_iter()
                .enumerate()
                .map(|(i, matrix)| SourceImage {
                    path: format!("synthetic://{i}"),
                    matrix,
                })
                .collect(),
        )
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourceImage>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        Box::new(
            self.images
                .iter()
                .cloned()
                .map(|r| r.map_err(anyhow::Error::msg)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<StatsReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<StatsReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &StatsReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `MatrixSink` for testing.
///
/// Keeps every saved matrix in memory keyed by a synthetic output path.
pub struct MockMatrixSink {
    saved: Arc<Mutex<Vec<(String, PixelMatrix)>>>,
    fail: bool,
}

impl MockMatrixSink {
    /// Creates a sink that accepts every matrix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            saved: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Creates a sink whose every save fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Returns `(output_path, matrix)` for each save, in order.
    #[must_use]
    pub fn saved(&self) -> Vec<(String, PixelMatrix)> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockMatrixSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixSink for MockMatrixSink {
    fn save(
        &self,
        source_path: &str,
        operation: &str,
        matrix: &PixelMatrix,
    ) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("disk full");
        }
        let output = format!("{source_path}#{operation}");
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((output.clone(), matrix.clone()));
        Ok(output)
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
