// Contract tests: assert only durable external invariants of the hook —
// the exit code, the silence on stdout, and the no-side-effect promise for
// rejected input. These must survive internal restructuring.

mod common;

use common::{count_activity_rows, db_path, event_json, run_hook_in};

fn scratch() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create scratch dir")
}

// ---- Exit code invariants ----

#[test]
fn contract_exit_code_zero_on_normal_input() {
    let dir = scratch();
    let input = event_json("PreToolUse", "Bash", "sess-e2e-test", serde_json::json!({"command": "ls"}));
    let (_, _, exit_code) = run_hook_in(dir.path(), &input);
    assert_eq!(exit_code, 0, "exit code must always be 0");
}

#[test]
fn contract_exit_code_zero_on_malformed_json() {
    let dir = scratch();
    let (_, _, exit_code) = run_hook_in(dir.path(), "this is not json");
    assert_eq!(exit_code, 0, "exit code must be 0 even on malformed input");
}

#[test]
fn contract_exit_code_zero_on_empty_stdin() {
    let dir = scratch();
    let (_, _, exit_code) = run_hook_in(dir.path(), "");
    assert_eq!(exit_code, 0, "exit code must be 0 even on empty stdin");
}

#[test]
fn contract_exit_code_zero_on_oversized_input() {
    let dir = scratch();
    let oversized = format!("{{\"prompt\": \"{}\"}}", "x".repeat(1024 * 1024 + 16));
    let (_, _, exit_code) = run_hook_in(dir.path(), &oversized);
    assert_eq!(exit_code, 0, "exit code must be 0 even on oversized input");
}

#[test]
fn contract_exit_code_zero_on_unknown_category() {
    let dir = scratch();
    let input = event_json("TotallyNewEvent", "Bash", "sess-e2e-test", serde_json::json!({}));
    let (_, _, exit_code) = run_hook_in(dir.path(), &input);
    assert_eq!(exit_code, 0);
}

#[test]
fn contract_exit_code_zero_with_broken_config() {
    let dir = scratch();
    let input = event_json("PreToolUse", "Bash", "sess-e2e-test", serde_json::json!({"command": "ls"}));
    let (_, _, exit_code) =
        common::run_hook_with_config_in(dir.path(), &input, "[[[ this is not toml");
    assert_eq!(exit_code, 0, "a broken config must not fail the hook");
}

// ---- stdout stays untouched ----

#[test]
fn contract_stdout_is_empty_on_success() {
    let dir = scratch();
    let input = event_json("PreToolUse", "Bash", "sess-e2e-test", serde_json::json!({"command": "ls"}));
    let (stdout, _, _) = run_hook_in(dir.path(), &input);
    assert!(stdout.is_empty(), "hook must not write to stdout, got: {stdout}");
}

#[test]
fn contract_stdout_is_empty_on_rejected_input() {
    let dir = scratch();
    let (stdout, _, _) = run_hook_in(dir.path(), "not json");
    assert!(stdout.is_empty());
}

// ---- No side effects for rejected input ----

#[test]
fn contract_malformed_input_creates_no_database() {
    let dir = scratch();
    run_hook_in(dir.path(), "totally broken {{{");
    assert!(!db_path(dir.path()).exists(), "rejected input must not touch storage");
}

#[test]
fn contract_empty_input_creates_no_database() {
    let dir = scratch();
    run_hook_in(dir.path(), "");
    assert!(!db_path(dir.path()).exists());
}

#[test]
fn contract_oversized_input_creates_no_database() {
    let dir = scratch();
    let oversized = format!("{{\"prompt\": \"{}\"}}", "x".repeat(1024 * 1024 + 16));
    run_hook_in(dir.path(), &oversized);
    assert!(!db_path(dir.path()).exists());
}

// ---- Accepted input persists exactly one event row ----

#[test]
fn contract_valid_event_creates_one_row() {
    let dir = scratch();
    let input = event_json("PreToolUse", "Bash", "sess-e2e-test", serde_json::json!({"command": "ls"}));
    run_hook_in(dir.path(), &input);
    assert_eq!(count_activity_rows(dir.path()), 1);
}

#[test]
fn contract_rejected_input_is_logged() {
    let dir = scratch();
    run_hook_in(dir.path(), "not json");
    let log_path = dir.path().join("logs").join("activity_monitor.json");
    assert!(log_path.exists(), "rejections must leave a diagnostic entry");
    let entries: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(log_path).unwrap()).unwrap();
    assert!(!entries.as_array().unwrap().is_empty());
}
