//! Result output port for writing statistics reports.

use crate::domain::StatsReport;

/// Port for outputting statistics reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &StatsReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
