//! Common utilities for CLI E2E tests.

use std::path::Path;
use std::process::Command;

/// Invoke the CLI against an isolated data directory.
pub fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studytimer"))
        .args(args)
        .env("STUDYTIMER_DATA_DIR", data_dir)
        .env_remove("STUDYTIMER_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
pub fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
    stdout
}

/// Invoke a CLI command and expect failure.
pub fn run_cli_failure(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert!(code != 0, "CLI command unexpectedly succeeded: {args:?}");
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

/// Run a command and parse its JSON output.
pub fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    parse_json(&run_cli_success(data_dir, args))
}

/// `type` tags of the events in a command outcome.
#[allow(dead_code)]
pub fn event_types(outcome: &serde_json::Value) -> Vec<String> {
    outcome["events"]
        .as_array()
        .map(|events| {
            events
                .iter()
                .filter_map(|e| e["type"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
