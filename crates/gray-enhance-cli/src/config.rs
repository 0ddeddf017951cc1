//! Configuration file support for gray-enhance.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/gray-enhance/config.toml` (lowest priority)
//! - Project-local: `.gray-enhance.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Statistics report settings.
    pub stats: StatsConfig,
    /// Contrast stretch settings.
    pub stretch: StretchConfig,
    /// Histogram equalization settings.
    pub equalize: EqualizeConfig,
    /// Piecewise remap settings.
    pub remap: RemapConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Number of intensity levels.
    pub depth: Option<usize>,
}

/// Statistics report configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Percentage trimmed from each end (0-100).
    pub percentage: Option<f64>,
    /// Include histogram arrays in reports.
    pub histogram: Option<bool>,
}

/// Contrast stretch configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StretchConfig {
    /// Percentile window used when no explicit bounds are given (0-100).
    pub percentage: Option<f64>,
    /// Output intensity of the lower bound.
    pub low_target: Option<f64>,
    /// Output intensity of the upper bound.
    pub high_target: Option<f64>,
}

/// Histogram equalization configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EqualizeConfig {
    /// Lower end of the output range.
    pub min_value: Option<u32>,
    /// Upper end of the output range.
    pub max_value: Option<u32>,
}

/// Piecewise remap breakpoints.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RemapConfig {
    pub x1: Option<u32>,
    pub y1: Option<u32>,
    pub x2: Option<u32>,
    pub y2: Option<u32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// File name suffix for enhanced images.
    pub suffix: Option<String>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/gray-enhance/config.toml`
    /// 2. Project-local: `.gray-enhance.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("stats.percentage", self.stats.percentage),
            ("stretch.percentage", self.stretch.percentage),
        ] {
            if let Some(p) = value {
                if !(0.0..=100.0).contains(&p) {
                    return Err(format!("{key} must be 0-100, got {p}"));
                }
            }
        }

        if let Some(d) = self.general.depth {
            if d < 2 {
                return Err(format!("general.depth must be at least 2, got {d}"));
            }
        }

        if let (Some(lo), Some(hi)) = (self.equalize.min_value, self.equalize.max_value) {
            if lo > hi {
                return Err(format!(
                    "equalize.min_value ({lo}) must not exceed equalize.max_value ({hi})"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);
        self.general.depth = other.general.depth.or(self.general.depth);

        // Stats
        self.stats.percentage = other.stats.percentage.or(self.stats.percentage);
        self.stats.histogram = other.stats.histogram.or(self.stats.histogram);

        // Stretch
        self.stretch.percentage = other.stretch.percentage.or(self.stretch.percentage);
        self.stretch.low_target = other.stretch.low_target.or(self.stretch.low_target);
        self.stretch.high_target = other.stretch.high_target.or(self.stretch.high_target);

        // Equalize
        self.equalize.min_value = other.equalize.min_value.or(self.equalize.min_value);
        self.equalize.max_value = other.equalize.max_value.or(self.equalize.max_value);

        // Remap
        self.remap.x1 = other.remap.x1.or(self.remap.x1);
        self.remap.y1 = other.remap.y1.or(self.remap.y1);
        self.remap.x2 = other.remap.x2.or(self.remap.x2);
        self.remap.y2 = other.remap.y2.or(self.remap.y2);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.suffix = other.output.suffix.or_else(|| self.output.suffix.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gray-enhance").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.gray-enhance.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".gray-enhance.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
