//! Enhancement commands - stretch, equalize and remap images to new files.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gray_enhance_adapters::FsMatrixSink;
use gray_enhance_core::{
    run_enhancement, ContrastStretchModule, Enhancement, EqualizeConfig, EqualizeModule,
    GrayScaleConfig, GrayScaleModule, StretchBounds, StretchConfig,
};
use tracing::{debug, info};

use super::{parse_percentage, ExitCode, InputArgs};
use crate::config::AppConfig;

/// Where enhanced copies are written.
#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Directory for enhanced images (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name suffix (default: the command name)
    #[arg(long)]
    pub suffix: Option<String>,
}

impl OutputArgs {
    fn with_config(mut self, config: &AppConfig) -> Self {
        if self.suffix.is_none() {
            self.suffix.clone_from(&config.output.suffix);
        }
        self
    }
}

/// Arguments for the stretch command.
#[derive(Args, Clone)]
pub struct StretchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Stretch the window that trims this percentage from each end (0-100)
    #[arg(long, value_parser = parse_percentage, conflicts_with_all = ["min_max", "from"])]
    pub percentage: Option<f64>,

    /// Stretch the image's own minimum..maximum
    #[arg(long, conflicts_with = "from")]
    pub min_max: bool,

    /// Lower end of an explicit source window
    #[arg(long, requires = "to")]
    pub from: Option<f64>,

    /// Upper end of an explicit source window
    #[arg(long, requires = "from")]
    pub to: Option<f64>,

    /// Intensity the lower bound maps to
    #[arg(long)]
    pub low_target: Option<f64>,

    /// Intensity the upper bound maps to
    #[arg(long)]
    pub high_target: Option<f64>,
}

impl StretchArgs {
    /// Apply `[stretch]` values the CLI did not set.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.input = self.input.with_config(config);
        self.output = self.output.with_config(config);
        if !self.min_max && self.from.is_none() {
            self.percentage = self.percentage.or(config.stretch.percentage);
        }
        self.low_target = self.low_target.or(config.stretch.low_target);
        self.high_target = self.high_target.or(config.stretch.high_target);
        self
    }

    /// Builds the stretch configuration, targeting `[0, depth - 1]` by default.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stretch_config(&self, depth: usize) -> StretchConfig {
        let defaults = StretchConfig::default();
        let bounds = match (self.from, self.to) {
            (Some(low), Some(high)) => StretchBounds::Fixed { low, high },
            _ if self.min_max => StretchBounds::MinMax,
            _ => self
                .percentage
                .map_or(defaults.bounds, StretchBounds::Percentile),
        };
        StretchConfig {
            low_target: self.low_target.unwrap_or(defaults.low_target),
            high_target: self.high_target.unwrap_or((depth - 1) as f64),
            bounds,
        }
    }
}

/// Arguments for the equalize command.
#[derive(Args, Clone)]
pub struct EqualizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Lower end of the output range (default: image minimum)
    #[arg(long)]
    pub min_value: Option<u32>,

    /// Upper end of the output range (default: image maximum)
    #[arg(long)]
    pub max_value: Option<u32>,
}

impl EqualizeArgs {
    /// Apply `[equalize]` values the CLI did not set.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.input = self.input.with_config(config);
        self.output = self.output.with_config(config);
        self.min_value = self.min_value.or(config.equalize.min_value);
        self.max_value = self.max_value.or(config.equalize.max_value);
        self
    }

    #[must_use]
    pub const fn equalize_config(&self) -> EqualizeConfig {
        EqualizeConfig {
            min_value: self.min_value,
            max_value: self.max_value,
        }
    }
}

/// Arguments for the remap command.
#[derive(Args, Clone)]
pub struct RemapArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// First breakpoint input intensity
    #[arg(long)]
    pub x1: Option<u32>,

    /// First breakpoint output intensity
    #[arg(long)]
    pub y1: Option<u32>,

    /// Second breakpoint input intensity
    #[arg(long)]
    pub x2: Option<u32>,

    /// Second breakpoint output intensity
    #[arg(long)]
    pub y2: Option<u32>,
}

impl RemapArgs {
    /// Apply `[remap]` values the CLI did not set.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.input = self.input.with_config(config);
        self.output = self.output.with_config(config);
        self.x1 = self.x1.or(config.remap.x1);
        self.y1 = self.y1.or(config.remap.y1);
        self.x2 = self.x2.or(config.remap.x2);
        self.y2 = self.y2.or(config.remap.y2);
        self
    }

    #[must_use]
    pub fn gray_scale_config(&self) -> GrayScaleConfig {
        let defaults = GrayScaleConfig::default();
        GrayScaleConfig {
            x1: self.x1.unwrap_or(defaults.x1),
            y1: self.y1.unwrap_or(defaults.y1),
            x2: self.x2.unwrap_or(defaults.x2),
            y2: self.y2.unwrap_or(defaults.y2),
        }
    }
}

/// Run the stretch command.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_stretch(args: &StretchArgs, depth: usize) -> Result<ExitCode> {
    let config = args.stretch_config(depth);
    debug!("Stretch config: {config:?}");
    run(&args.input, &args.output, &ContrastStretchModule::new(config), depth)
}

/// Run the equalize command.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_equalize(args: &EqualizeArgs, depth: usize) -> Result<ExitCode> {
    let config = args.equalize_config();
    debug!("Equalize config: {config:?}");
    run(&args.input, &args.output, &EqualizeModule::new(config), depth)
}

/// Run the remap command.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_remap(args: &RemapArgs, depth: usize) -> Result<ExitCode> {
    let config = args.gray_scale_config();
    debug!("Remap config: {config:?}");
    run(&args.input, &args.output, &GrayScaleModule::new(config), depth)
}

/// Applies `enhancement` to every input and prints one JSON line per written file.
fn run(
    input: &InputArgs,
    output: &OutputArgs,
    enhancement: &dyn Enhancement,
    depth: usize,
) -> Result<ExitCode> {
    info!(
        "Running {} on {} paths (depth {depth})",
        enhancement.name(),
        input.paths.len()
    );

    let source = input.source(depth);
    let progress = input.progress_bar(&source);
    let sink = FsMatrixSink::new(output.output_dir.clone(), output.suffix.clone());

    let summary = run_enhancement(&source, enhancement, &sink, &progress);

    let mut stdout = io::stdout().lock();
    for written in &summary.written {
        writeln!(stdout, "{}", serde_json::to_string(written)?)?;
    }
    stdout.flush()?;

    Ok(ExitCode::from_summary(&summary.batch))
}
