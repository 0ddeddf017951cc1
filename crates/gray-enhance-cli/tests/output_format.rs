//! Output format validation tests.
//!
//! Tests JSON/JSONL output format correctness and required field presence.

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use gray_enhance_test_support::{write_gray_png, SyntheticMatrixBuilder};
use serde_json::Value;

/// Writes a 256x1 matrix holding every 8-bit level once.
fn every_level_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("levels.png");
    write_gray_png(&SyntheticMatrixBuilder::every_level(1), &path);
    path
}

fn gray_enhance() -> Command {
    let mut cmd = Command::cargo_bin("gray-enhance").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/gray-enhance-test");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_format_single_object_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(gray_enhance().args(["stats", "--format", "jsonl"]).arg(&path));

    let lines: Vec<_> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1);
    let value: Value = serde_json::from_str(lines[0]).unwrap();
    assert!(value.is_object(), "JSONL line should be an object");
}

#[test]
fn test_jsonl_format_multiple_images() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(gray_enhance().arg("stats").arg(&path).arg(&path));

    let lines: Vec<_> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 2, "Should have one line per image");
    for line in lines {
        let parsed: Value = serde_json::from_str(line).unwrap();
        assert!(parsed.is_object());
    }
}

// === JSON Array Format Tests ===

#[test]
fn test_json_format_is_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(
        gray_enhance()
            .args(["stats", "--format", "json"])
            .arg(&path)
            .arg(&path),
    );

    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_format_empty_array_for_no_images() {
    let dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(
        gray_enhance()
            .args(["stats", "--format", "json"])
            .arg(dir.path()),
    );

    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_pretty_json_spans_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(
        gray_enhance()
            .args(["stats", "--format", "json", "--pretty"])
            .arg(&path),
    );

    assert!(stdout.lines().count() > 3);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array());
}

// === Report Field Tests ===

#[test]
fn test_report_required_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(gray_enhance().arg("stats").arg(&path));
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    for field in [
        "path",
        "timestamp",
        "dimensions",
        "depth",
        "min",
        "max",
        "mean",
        "std_dev",
        "contrast",
        "percentile",
    ] {
        assert!(report.get(field).is_some(), "missing field {field}");
    }
    assert!(report.get("histogram").is_none());
    assert!(report["timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn test_report_values_for_every_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(gray_enhance().arg("stats").arg(&path));
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(report["dimensions"]["width"], 256);
    assert_eq!(report["dimensions"]["height"], 1);
    assert_eq!(report["depth"], 256);
    assert_eq!(report["min"], 0);
    assert_eq!(report["max"], 255);
    assert_eq!(report["mean"].as_f64().unwrap(), 127.5);
    // A single row has no vertical neighbours.
    assert_eq!(report["contrast"], 0);
    assert_eq!(report["percentile"]["percentage"].as_f64().unwrap(), 5.0);
    assert_eq!(report["percentile"]["low"], 12);
    assert_eq!(report["percentile"]["high"], 242);
}

#[test]
fn test_report_contrast_for_uniform_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    write_gray_png(&SyntheticMatrixBuilder::uniform(4, 4, 10), &path);

    let stdout = stdout_of(gray_enhance().arg("stats").arg(&path));
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    // 2 * (height - 1) * width
    assert_eq!(report["contrast"], 24);
    assert_eq!(report["std_dev"].as_f64().unwrap(), 0.0);
    assert_eq!(report["percentile"]["low"], 10);
    assert_eq!(report["percentile"]["high"], 9);
}

#[test]
fn test_histogram_flag_includes_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    let stdout = stdout_of(gray_enhance().args(["stats", "--histogram"]).arg(&path));
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    let histogram = report["histogram"].as_array().unwrap();
    assert_eq!(histogram.len(), 256);
    assert!(histogram.iter().all(|c| c == 1));

    let cumulative = report["cumulative_histogram"].as_array().unwrap();
    assert_eq!(cumulative[0], 1);
    assert_eq!(cumulative[255], 256);
}

#[test]
fn test_sixteen_bit_depth_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.png");
    let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(3, 1, vec![0, 1000, 65535])
        .unwrap();
    img.save(&path).unwrap();

    let stdout = stdout_of(
        gray_enhance()
            .args(["--depth", "65536", "stats", "--histogram"])
            .arg(&path),
    );
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(report["depth"], 65536);
    assert_eq!(report["max"], 65535);
    assert_eq!(report["histogram"].as_array().unwrap().len(), 65536);
    assert_eq!(report["histogram"][1000], 1);
}

#[test]
fn test_arbitrary_depth_rescales_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());

    for (depth, top) in [(16, 15), (1000, 999)] {
        let mut cmd = gray_enhance();
        cmd.args(["--depth", &depth.to_string(), "stats", "--histogram"])
            .arg(&path);
        cmd.assert().code(0);

        let report: Value = serde_json::from_str(stdout_of(&mut cmd).trim()).unwrap();
        assert_eq!(report["depth"], depth);
        assert_eq!(report["min"], 0);
        assert_eq!(report["max"], top);
        let histogram = report["histogram"].as_array().unwrap();
        assert_eq!(histogram.len(), depth);
        assert_eq!(histogram.iter().map(|c| c.as_u64().unwrap()).sum::<u64>(), 256);
    }
}

#[test]
fn test_arbitrary_depth_enhancement_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());
    let out = dir.path().join("out");

    gray_enhance()
        .args(["--depth", "1000", "stretch", "--min-max"])
        .arg(&path)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(0);

    let written = image::open(out.join("levels_stretch.png")).unwrap().to_luma8();
    assert_eq!(written.get_pixel(0, 0).0[0], 0);
    assert_eq!(written.get_pixel(255, 0).0[0], 255);
}

// === Enhancement Output Tests ===

#[test]
fn test_enhancement_prints_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = every_level_fixture(dir.path());
    let out = dir.path().join("out");

    let stdout = stdout_of(
        gray_enhance()
            .arg("equalize")
            .arg(&path)
            .arg("-o")
            .arg(&out),
    );

    let line: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(line["operation"], "equalize");
    assert_eq!(line["input"], path.to_string_lossy().as_ref());
    assert_eq!(
        line["output"],
        out.join("levels_equalize.png").to_string_lossy().as_ref()
    );
    assert!(out.join("levels_equalize.png").exists());
}
