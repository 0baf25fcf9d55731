//! CLI E2E tests for the `osim` binary.
//!
//! Validates:
//! - Inline flags and `--input` documents produce the documented JSON reports
//! - Summary output renders the text tables
//! - Unknown algorithms and missing parameters exit 10 with a JSON envelope
//! - Invalid workloads exit 11
//! - Timelines that overflow the tick range exit 12
//! - Unreadable input files exit 13
//! - `--config` files change limits and defaults; invalid ones are reported
//! - `algorithms`, `schema` and `compare` commands

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

// ============================================================================
// Helpers
// ============================================================================

/// Get a Command for the osim binary with no ambient config.
fn osim() -> Command {
    let mut cmd = cargo_bin_cmd!("osim");
    cmd.timeout(Duration::from_secs(60));
    cmd.env_remove("OSIM_CONFIG");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/osim-test");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("parse JSON")
}

fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

// ============================================================================
// Engines
// ============================================================================

#[test]
fn test_cpu_inline_fcfs() {
    let json = stdout_json(osim().args([
        "cpu", "-a", "FCFS", "-p", "1:0:5", "-p", "2:1:3", "-p", "3:2:8",
    ]));
    assert_eq!(json["algorithm"], "FCFS");
    assert_eq!(json["metrics"]["avg_waiting"], 3.33);
    assert_eq!(json["processes"][2]["start"], 8);
    assert_eq!(json["processes"][2]["finish"], 16);
    assert!(json.get("quantum").is_none());
    assert_eq!(json["schema_version"], "1.0.0");
}

#[test]
fn test_cpu_round_robin_from_input_file() {
    let dir = tempdir().unwrap();
    let input = write_file(
        &dir,
        "rr.json",
        r#"{"algorithm":"RoundRobin","time_quantum":2,"processes":[
            {"pid":1,"arrival_time":0,"burst_time":5},
            {"pid":2,"arrival_time":1,"burst_time":3},
            {"pid":3,"arrival_time":2,"burst_time":1}]}"#,
    );
    let json = stdout_json(osim().args(["cpu", "--input"]).arg(&input));
    assert_eq!(json["quantum"], 2);
    let timeline = json["timeline"].as_array().expect("timeline array");
    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline[5]["pid"], 1);
    assert_eq!(timeline[5]["end"], 9);
}

#[test]
fn test_page_inline_lru() {
    let json = stdout_json(osim().args([
        "page",
        "-a",
        "LRU",
        "--pages",
        "1,2,3,4,1,2,5,1,2,3,4,5",
        "--frames",
        "4",
    ]));
    assert_eq!(json["metrics"]["page_faults"], 8);
    assert_eq!(json["trace"][0]["frame_state"], serde_json::json!([1, -1, -1, -1]));
    assert_eq!(json["trace"][4]["status"], "HIT");
}

#[test]
fn test_disk_inline_scan() {
    let json = stdout_json(osim().args([
        "disk",
        "-a",
        "SCAN",
        "--requests",
        "98,183,37,122,14,124,65,67",
        "--head",
        "53",
        "--direction",
        "right",
    ]));
    assert_eq!(json["metrics"]["total_seek"], 299);
    assert_eq!(json["disk_size"], 200);
    assert_eq!(json["direction"], "right");
    assert_eq!(json["sequence"][6], 37);
}

#[test]
fn test_jsonl_is_single_line() {
    let output = osim()
        .args(["--format", "jsonl", "disk", "-a", "FCFS", "--requests", "10,20", "--head", "0"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);
}

#[test]
fn test_summary_output() {
    osim()
        .args([
            "--format", "summary", "cpu", "-a", "FCFS", "-p", "1:0:5", "-p", "2:1:3", "-p",
            "3:2:8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("P3[8-16]"));
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_unknown_algorithm_exits_10() {
    let output = osim()
        .args(["cpu", "-a", "Lottery", "-p", "1:0:5"])
        .assert()
        .code(10)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["error"]["code"], 11);
    assert_eq!(json["error"]["message"], "unknown cpu algorithm: Lottery");
}

#[test]
fn test_missing_quantum_envelope() {
    let output = osim()
        .args(["cpu", "-a", "RR", "-p", "1:0:5"])
        .assert()
        .code(10)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["error"]["code"], 12);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("quantum"));
}

#[test]
fn test_duplicate_pid_exits_11() {
    osim()
        .args(["cpu", "-a", "SJF", "-p", "1:0:5", "-p", "1:2:3"])
        .assert()
        .code(11)
        .stdout(predicate::str::contains("duplicate pid 1"));
}

#[test]
fn test_head_outside_disk_exits_11() {
    osim()
        .args([
            "disk", "-a", "SSTF", "--requests", "10", "--head", "250", "--disk-size", "200",
        ])
        .assert()
        .code(11);
}

#[test]
fn test_missing_input_file_exits_13() {
    osim()
        .args(["page", "--input", "/nonexistent/osim/request.json"])
        .assert()
        .code(13);
}

#[test]
fn test_summary_errors_go_to_stderr() {
    osim()
        .args(["--format", "summary", "page", "-a", "MRU", "--pages", "1", "--frames", "1"])
        .assert()
        .code(10)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown page algorithm: MRU"));
}

#[test]
fn test_malformed_process_flag_is_usage_error() {
    osim()
        .args(["cpu", "-a", "FCFS", "-p", "1:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pid:arrival:burst"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_limits_apply() {
    let dir = tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"schema_version":"1.0.0","limits":{"max_processes":1}}"#,
    );
    osim()
        .arg("--config")
        .arg(&config)
        .args(["cpu", "-a", "FCFS", "-p", "1:0:5", "-p", "2:1:3"])
        .assert()
        .code(11);
}

#[test]
fn test_config_defaults_apply_to_disk() {
    let dir = tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"schema_version":"1.0.0","defaults":{"direction":"left"}}"#,
    );
    let json = stdout_json(
        osim()
            .arg("--config")
            .arg(&config)
            .args(["disk", "-a", "LOOK", "--requests", "98,37,14", "--head", "53"]),
    );
    assert_eq!(json["direction"], "left");
    assert_eq!(json["sequence"], serde_json::json!([37, 14, 98]));
}

#[test]
fn test_config_show_defaults() {
    let json = stdout_json(osim().args(["config", "show"]));
    assert_eq!(json["source"], "defaults");
    assert_eq!(json["config"]["defaults"]["disk_size"], 200);
}

#[test]
fn test_config_validate_reports_errors() {
    let dir = tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"schema_version":"1.0.0","defaults":{"quantum":0}}"#,
    );
    let output = osim()
        .arg("--config")
        .arg(&config)
        .args(["config", "validate"])
        .assert()
        .code(10)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["valid"], false);
    assert!(!json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_huge_burst_exits_11_by_default() {
    osim()
        .args(["cpu", "-a", "FCFS", "-p", "1:0:18446744073709551615", "-p", "2:0:1"])
        .assert()
        .code(11)
        .stdout(predicate::str::contains("horizon"));
}

#[test]
fn test_tick_overflow_exits_12() {
    let dir = tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"schema_version":"1.0.0","limits":{"max_tick":18446744073709551615}}"#,
    );
    let output = osim()
        .arg("--config")
        .arg(&config)
        .args(["cpu", "-a", "SRTF", "-p", "1:0:18446744073709551615", "-p", "2:0:1"])
        .assert()
        .code(12)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["error"]["code"], 30);
}

#[test]
fn test_config_env_var_is_honored() {
    let dir = tempdir().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"schema_version":"1.0.0","limits":{"max_frames":2},"defaults":{"frame_count":2}}"#,
    );
    osim()
        .env("OSIM_CONFIG", &config)
        .args(["page", "-a", "FIFO", "--pages", "1,2", "--frames", "3"])
        .assert()
        .code(11);
}

// ============================================================================
// Catalog, schema, compare
// ============================================================================

#[test]
fn test_algorithms_listing() {
    let json = stdout_json(osim().args(["algorithms"]));
    assert_eq!(json.as_array().unwrap().len(), 15);

    let json = stdout_json(osim().args(["algorithms", "cpu"]));
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["FCFS", "SJF", "SRTF", "Priority", "RoundRobin"]);
}

#[test]
fn test_schema_command() {
    let json = stdout_json(osim().args(["schema", "page"]));
    assert!(json["properties"].get("page_sequence").is_some());

    let json = stdout_json(osim().args(["schema", "disk", "--compare"]));
    assert!(json["properties"].get("algorithms").is_some());
}

#[test]
fn test_compare_page_marks_best() {
    let json = stdout_json(osim().args([
        "compare",
        "page",
        "--pages",
        "7,0,1,2,0,3,0,4,2,3,0,3,2,1,2,0,1,7,0,1",
        "--frames",
        "3",
    ]));
    assert_eq!(json["engine"], "page");
    assert_eq!(json["results"].as_array().unwrap().len(), 4);
    assert_eq!(json["best"], "Optimal");
}

#[test]
fn test_compare_keeps_going_after_a_failure() {
    let json = stdout_json(osim().args([
        "compare",
        "disk",
        "--algorithms",
        "SSTF,ELEVATOR",
        "--requests",
        "10,90",
        "--head",
        "50",
    ]));
    assert_eq!(json["results"][0]["metrics"]["total_seek"], 120);
    assert!(json["results"][1]["error"]
        .as_str()
        .unwrap()
        .contains("ELEVATOR"));
}
