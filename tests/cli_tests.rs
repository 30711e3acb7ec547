//! End-to-end tests for the simcheck binary
//!
//! Sample files are written to a temp dir and fed through each subcommand.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn bench_files(dir: &TempDir) -> (PathBuf, PathBuf) {
    let sim = write(
        dir,
        "sim.csv",
        "parameter_name,value,unit\n\
         max_speed,4000,rpm\n\
         noise_level,68.2,dB\n\
         backlash,0,mm\n",
    );
    let test = write(
        dir,
        "test.csv",
        "parameter_name,value,unit\n\
         max_speed,4200,rpm\n\
         noise_level,90.0,dB\n\
         backlash,0.002,mm\n",
    );
    (sim, test)
}

#[test]
fn test_compare_text_report() {
    let dir = TempDir::new().unwrap();
    let (sim, test) = bench_files(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("compare")
        .arg("--sim")
        .arg(&sim)
        .arg("--test")
        .arg(&test)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parameters compared: 3"))
        .stdout(predicate::str::contains("max_speed"))
        .stdout(predicate::str::contains("n/a"))
        .stdout(predicate::str::contains("noise_level"));
}

#[test]
fn test_compare_json_has_null_for_zero_simulation() {
    let dir = TempDir::new().unwrap();
    let (sim, test) = bench_files(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    let output = cmd
        .arg("compare")
        .arg("--sim")
        .arg(&sim)
        .arg("--test")
        .arg(&test)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["format"], "simcheck-json-v1");
    assert_eq!(json["kind"], "COMPARISON");

    let summary = &json["result"]["summary"];
    assert_eq!(summary["total_parameters"], 3);
    assert_eq!(summary["not_computable"], 1);
    // max_speed 5% passes, noise_level ~32% fails
    assert_eq!(summary["within_tolerance"], 1);
    assert!(json["result"]["comparisons"][2]["relative_error_percent"].is_null());
}

#[test]
fn test_compare_tolerance_override() {
    let dir = TempDir::new().unwrap();
    let (sim, test) = bench_files(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    let output = cmd
        .args(["--format", "json", "compare", "-t", "50"])
        .arg("--sim")
        .arg(&sim)
        .arg("--test")
        .arg(&test)
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["comparison"]["tolerance_percent"], 50.0);
    assert_eq!(json["result"]["summary"]["within_tolerance"], 2);
}

#[test]
fn test_compare_negative_tolerance_fails() {
    let dir = TempDir::new().unwrap();
    let (sim, test) = bench_files(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("compare")
        .arg("--sim")
        .arg(&sim)
        .arg("--test")
        .arg(&test)
        .arg("--tolerance=-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance_percent"));
}

#[test]
fn test_trend_with_forecast() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "wear.csv",
        "name,value,timestamp\n\
         tool_wear,0.40,2024-06-04T08:00:00Z\n\
         tool_wear,0.10,2024-06-01T08:00:00Z\n\
         tool_wear,0.30,2024-06-03T08:00:00Z\n\
         tool_wear,0.20,2024-06-02T08:00:00Z\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("trend")
        .arg("--input")
        .arg(&input)
        .arg("--forecast")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("tool_wear"))
        .stdout(predicate::str::contains("increasing"))
        .stdout(predicate::str::contains("Forecast tool_wear"));
}

#[test]
fn test_stats_json_histogram() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "samples.json",
        r#"[
            {"parameter_name": "runout", "value": 1.0, "unit": "μm"},
            {"parameter_name": "runout", "value": 2.0, "unit": "μm"},
            {"parameter_name": "runout", "value": 3.0, "unit": "μm"},
            {"parameter_name": "runout", "value": 4.0, "unit": "μm"}
        ]"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    let output = cmd
        .args(["stats", "--bins", "3", "--format", "json", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stats = &json["result"]["statistics"][0];
    assert_eq!(stats["parameter"], "runout");
    assert_eq!(stats["mean"], 2.5);
    assert_eq!(stats["variance"], 1.25);

    let bins = json["result"]["distribution"][0]["histogram"]["bins"]
        .as_array()
        .unwrap();
    assert_eq!(bins.len(), 3);
    let total: u64 = bins.iter().map(|b| b["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 4);
}

#[test]
fn test_config_file_applies() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "s.csv", "name,value\nx,1\nx,2\nx,3\n");
    let config = write(&dir, "simcheck.toml", "[statistics]\nhistogram_bins = 2\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    let output = cmd
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "stats", "-i"])
        .arg(&input)
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["result"]["distribution"][0]["histogram"]["bins"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.args(["stats", "-i", "/nonexistent/samples.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_malformed_csv_reports_line() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.csv", "name,value\nx,1\nx,oops\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("stats")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 3"));
}

#[test]
fn test_oversized_forecast_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "wear.csv", "name,value\ntool_wear,0.1\ntool_wear,0.2\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("trend")
        .arg("--input")
        .arg(&input)
        .arg("--forecast")
        .arg("10000000000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("forecast_steps"));
}

#[test]
fn test_quoted_parameter_name_survives() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "quoted.csv",
        "name;value\n\"turret \"\"B\"\"; slot 2\";12.5\n\"turret \"\"B\"\"; slot 2\";13.0\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("simcheck");
    cmd.arg("stats")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"turret "B"; slot 2"#));
}
