//! CLI command definitions and handlers.

pub mod enhance;
pub mod stats;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gray_enhance_adapters::FsImageSource;
use gray_enhance_core::{BatchSummary, ImageSource, DEFAULT_COLOR_DEPTH};

use crate::config::AppConfig;
use crate::output::ProgressBar;

/// Gray Enhance - grayscale statistics and contrast enhancement
#[derive(Parser)]
#[command(name = "gray-enhance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of intensity levels (default 256)
    #[arg(long, global = true, value_parser = parse_depth)]
    pub depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Report histogram, contrast and percentile statistics
    Stats(stats::StatsArgs),
    /// Linearly stretch an intensity window onto a target range
    Stretch(enhance::StretchArgs),
    /// Equalize the histogram onto a target range
    Equalize(enhance::EqualizeArgs),
    /// Apply a three-segment piecewise-linear remap
    Remap(enhance::RemapArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was processed.
    Success = 0,
    /// At least one image was skipped.
    Skipped = 1,
    /// A fatal error stopped the command.
    Error = 2,
}

impl ExitCode {
    /// Derives the exit code for a finished batch.
    #[must_use]
    pub const fn from_summary(summary: &BatchSummary) -> Self {
        if summary.skipped > 0 {
            Self::Skipped
        } else {
            Self::Success
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Parse and validate a percentage (0-100).
pub fn parse_percentage(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Parse and validate a color depth (at least 2 levels).
fn parse_depth(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid level count"))?;
    if value >= 2 {
        Ok(value)
    } else {
        Err(format!("depth must be at least 2, got {value}"))
    }
}

/// Resolves the color depth: CLI, then config, then the 8-bit default.
#[must_use]
pub fn resolve_depth(cli: Option<usize>, config: &AppConfig) -> usize {
    cli.or_else(|| config.general.depth.filter(|&d| d >= 2))
        .unwrap_or(DEFAULT_COLOR_DEPTH)
}

/// Input arguments shared by every subcommand.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl InputArgs {
    /// Apply `[general]` and `[output]` values the CLI did not set.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if !self.recursive {
            self.recursive = config.general.recursive.unwrap_or(false);
        }
        if !self.progress {
            self.progress = config.output.progress.unwrap_or(false);
        }
        self
    }

    /// Builds the filesystem source for these paths.
    #[must_use]
    pub fn source(&self, depth: usize) -> FsImageSource {
        FsImageSource::new(self.paths.clone(), self.recursive, depth)
    }

    /// Builds the progress reporter for a batch over `source`.
    #[must_use]
    pub fn progress_bar(&self, source: &dyn ImageSource) -> ProgressBar {
        let show_bar = !self.quiet && (self.progress || std::io::stderr().is_terminal());
        let total = source.count_hint().map(|t| t as u64);
        ProgressBar::new(total, self.quiet, show_bar)
    }
}
