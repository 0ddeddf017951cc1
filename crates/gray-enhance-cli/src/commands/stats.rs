//! Stats command - report per-image intensity statistics.

use anyhow::Result;
use clap::{Args, ValueEnum};
use gray_enhance_core::{run_stats, StatsOptions};
use tracing::info;

use super::{parse_percentage, ExitCode, InputArgs};
use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

impl OutputFormat {
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Hardcoded default values.
mod defaults {
    pub const PERCENTAGE: f64 = 5.0;
}

/// Arguments for the stats command.
#[derive(Args, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Percentage trimmed from each end when locating bounds (0-100)
    #[arg(long, value_parser = parse_percentage)]
    pub percentage: Option<f64>,

    /// Include histogram and cumulative histogram arrays
    #[arg(long)]
    pub histogram: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl StatsArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.input = self.input.with_config(config);
        self.percentage = self.percentage.or(config.stats.percentage);
        if !self.histogram {
            self.histogram = config.stats.histogram.unwrap_or(false);
        }
        if self.format.is_none() {
            self.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }
        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
        self
    }

    fn percentage(&self) -> f64 {
        self.percentage.unwrap_or(defaults::PERCENTAGE)
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Run the stats command.
///
/// Expects `args` to have been processed through `with_config()` first.
///
/// # Errors
///
/// Returns an error if writing reports to stdout fails.
pub fn run(args: &StatsArgs, depth: usize) -> Result<ExitCode> {
    info!(
        "Running stats command on {} paths (depth {depth})",
        args.input.paths.len()
    );

    let source = args.input.source(depth);
    let progress = args.input.progress_bar(&source);
    let output = match args.format() {
        OutputFormat::Jsonl => JsonOutput::stdout(),
        OutputFormat::Json => JsonOutput::stdout_array(args.pretty),
    };
    let options = StatsOptions {
        percentage: args.percentage(),
        include_histogram: args.histogram,
    };

    let summary = run_stats(&source, &output, &progress, &options)?;
    Ok(ExitCode::from_summary(&summary))
}
