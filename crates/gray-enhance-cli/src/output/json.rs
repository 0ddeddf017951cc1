//! JSON output adapter.

use anyhow::Result;
use gray_enhance_core::{ResultOutput, StatsReport};
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON output adapter.
///
/// In lines mode every report is written as it arrives. In array mode
/// reports are buffered and written as one array on `flush()`.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    buffered: Option<Mutex<Vec<StatsReport>>>,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a JSON Lines output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a JSON array output writing to stdout.
    #[must_use]
    pub fn stdout_array(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    /// Creates a JSON Lines output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            buffered: None,
            pretty: false,
        }
    }

    /// Creates a JSON array output writing to the given writer.
    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            buffered: Some(Mutex::new(Vec::new())),
            pretty,
        }
    }

    /// Writes a batch of reports as a JSON array.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_array(&self, reports: &[StatsReport]) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(reports)?
        } else {
            serde_json::to_string(reports)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &StatsReport) -> Result<()> {
        if let Some(buffer) = &self.buffered {
            buffer
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                .push(report.clone());
            return Ok(());
        }
        let json = serde_json::to_string(report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let Some(buffer) = &self.buffered {
            let reports = std::mem::take(
                &mut *buffer
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            self.write_array(&reports)?;
        }
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
