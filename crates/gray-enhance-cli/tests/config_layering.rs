//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use gray_enhance_test_support::{write_gray_png, SyntheticMatrixBuilder};
use predicates::prelude::*;
use serde_json::Value;

/// Project directory with an image and an isolated XDG config home.
struct Workspace {
    dir: tempfile::TempDir,
    image: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("levels.png");
        write_gray_png(&SyntheticMatrixBuilder::every_level(1), &image);
        fs::create_dir_all(dir.path().join("xdg").join("gray-enhance")).unwrap();
        Self { dir, image }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn project_config(&self, content: &str) {
        fs::write(self.path().join(".gray-enhance.toml"), content).unwrap();
    }

    fn xdg_config(&self, content: &str) {
        fs::write(
            self.path().join("xdg").join("gray-enhance").join("config.toml"),
            content,
        )
        .unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gray-enhance").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"));
        cmd
    }

    fn stats(&self, extra: &[&str]) -> Value {
        let output = self
            .command()
            .arg("stats")
            .args(extra)
            .arg(&self.image)
            .output()
            .unwrap();
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_defaults_without_config() {
    let ws = Workspace::new();
    let report = ws.stats(&[]);
    assert_eq!(report["percentile"]["low"], 12);
}

#[test]
fn test_project_config_applies_percentage() {
    let ws = Workspace::new();
    ws.project_config("[stats]\npercentage = 0.0\n");

    let report = ws.stats(&[]);
    assert_eq!(report["percentile"]["low"], 0);
    assert_eq!(report["percentile"]["high"], 255);
}

#[test]
fn test_cli_overrides_project_config() {
    let ws = Workspace::new();
    ws.project_config("[stats]\npercentage = 0.0\n");

    let report = ws.stats(&["--percentage", "5"]);
    assert_eq!(report["percentile"]["low"], 12);
}

#[test]
fn test_project_config_overrides_xdg() {
    let ws = Workspace::new();
    ws.xdg_config("[stats]\npercentage = 0.0\nhistogram = true\n");
    ws.project_config("[stats]\npercentage = 5.0\n");

    let report = ws.stats(&[]);
    // percentage from project, histogram preserved from XDG
    assert_eq!(report["percentile"]["low"], 12);
    assert!(report["histogram"].is_array());
}

#[test]
fn test_project_config_applies_format() {
    let ws = Workspace::new();
    ws.project_config("[output]\nformat = 'json'\n");

    ws.command()
        .arg("stats")
        .arg(&ws.image)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_format_overrides_project_config() {
    let ws = Workspace::new();
    ws.project_config("[output]\nformat = 'json'\n");

    ws.command()
        .args(["stats", "--format", "jsonl"])
        .arg(&ws.image)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_config_suffix_names_output() {
    let ws = Workspace::new();
    ws.project_config("[output]\nsuffix = 'boosted'\n");

    ws.command().arg("stretch").arg(&ws.image).assert().code(0);

    assert!(ws.path().join("levels_boosted.png").exists());
}

#[test]
fn test_config_remap_breakpoints_are_used() {
    let ws = Workspace::new();
    ws.project_config("[remap]\nx1 = 0\n");

    ws.command()
        .arg("remap")
        .arg(&ws.image)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn test_config_depth_applies() {
    let ws = Workspace::new();
    ws.project_config("[general]\ndepth = 65536\n");

    let report = ws.stats(&[]);
    assert_eq!(report["depth"], 65536);
}

#[test]
fn test_invalid_config_value_warns() {
    let ws = Workspace::new();
    ws.project_config("[stats]\npercentage = 150.0\n");

    ws.command()
        .arg("stats")
        .arg(&ws.image)
        .assert()
        .stderr(predicate::str::contains("warning: stats.percentage"));
}

#[test]
fn test_unparseable_config_is_ignored() {
    let ws = Workspace::new();
    ws.project_config("[stats\npercentage = 0\n");

    let report = ws.stats(&[]);
    assert_eq!(report["percentile"]["low"], 12);
}
