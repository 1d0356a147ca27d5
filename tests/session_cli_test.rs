// ABOUTME: Integration tests for the session-compiler binary
// ABOUTME: Runs compile, match-name, and hydrate against temporary fixture files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Integration tests for the session-compiler binary.

mod common;

use common::{library_json, sample_modern_session};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run the binary and capture exit code, stdout, and stderr
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_session-compiler"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn write(dir: &Path, file: &str, value: &Value) -> String {
    let path = dir.join(file);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.display().to_string()
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run_cli(&["--help"]);

    assert_eq!(code, 0);
    for command in ["compile", "match-name", "hydrate"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[test]
fn test_compile_prints_timeline_json() {
    let dir = TempDir::new().unwrap();
    let session = write(
        dir.path(),
        "session.json",
        &serde_json::to_value(sample_modern_session("cli-1")).unwrap(),
    );
    let library = write(dir.path(), "exercises.json", &library_json());

    let (code, stdout, stderr) = run_cli(&["compile", "--session", &session, "--library", &library]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["protocol"], "R");
    assert_eq!(output["modules"].as_array().map(Vec::len), Some(5));
    assert_eq!(output["timeline"][0]["type"], "PLANNING");
}

#[test]
fn test_match_name_reports_key_and_record() {
    let dir = TempDir::new().unwrap();
    let library = write(dir.path(), "exercises.json", &library_json());

    let (code, stdout, _) = run_cli(&["match-name", "PRESS-BANCAS", "--library", &library]);
    assert_eq!(code, 0);

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["key"], "pressbanca");
    assert_eq!(output["matched"]["nameEs"], "Press Banca");

    let (_, stdout, _) = run_cli(&["match-name", "Turkish get-up", "--library", &library]);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert!(output["matched"].is_null());
}

#[test]
fn test_hydrate_malformed_fixture_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sessions.json"), "[{]").unwrap();

    let (code, _, _) = run_cli(&[
        "hydrate",
        "--fixtures",
        &dir.path().display().to_string(),
        "--session-id",
        "any",
    ]);
    assert_ne!(code, 0);
}

#[test]
fn test_hydrate_prints_state_with_history() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "sessions.json",
        &json!([serde_json::to_value(sample_modern_session("cli-2")).unwrap()]),
    );
    write(dir.path(), "exercises.json", &library_json());
    write(
        dir.path(),
        "logs.json",
        &json!([{"id": "log-1", "athleteId": "ath-1", "moduleId": "base-1", "stableId": "base-stable",
                 "status": "completed", "recordedAt": "2025-04-01T08:00:00Z"}]),
    );

    let (code, stdout, stderr) = run_cli(&[
        "hydrate",
        "--fixtures",
        &dir.path().display().to_string(),
        "--session-id",
        "cli-2",
        "--athlete",
        "ath-1",
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let state: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(state["loading"], false);
    assert!(state["error"].is_null());
    assert_eq!(state["history"]["base-1"]["id"], "log-1");
}
