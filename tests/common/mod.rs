// Shared test helpers: spawn the built binary with a scratch working
// directory so `.claude/` and `logs/` land inside a tempdir.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_claude-activity-hook"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Run `hook` with the given stdin from `dir`. Returns (stdout, stderr, exit_code).
pub fn run_hook_in(dir: &Path, stdin_input: &str) -> (String, String, i32) {
    run_args_in(dir, stdin_input, &["hook"])
}

/// Run `hook --config <file>` with the config content written into the dir.
pub fn run_hook_with_config_in(
    dir: &Path,
    stdin_input: &str,
    config_content: &str,
) -> (String, String, i32) {
    let config_path = dir.join("activity-monitor.toml");
    std::fs::write(&config_path, config_content).expect("failed to write config");
    let config_arg = config_path.to_str().unwrap().to_string();
    run_args_in(dir, stdin_input, &["hook", "--config", &config_arg])
}

/// Runs the binary with the given stdin, args, and working directory.
pub fn run_args_in(dir: &Path, stdin_input: &str, args: &[&str]) -> (String, String, i32) {
    let mut cmd = Command::new(binary_path());
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    let output = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::{ErrorKind, Write};
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

pub fn event_json(category: &str, tool: &str, session: &str, tool_input: serde_json::Value) -> String {
    serde_json::json!({
        "session_id": session,
        "hook_event_name": category,
        "tool_name": tool,
        "tool_input": tool_input,
        "transcript_path": "/tmp/transcript.json",
        "cwd": "/tmp/test"
    })
    .to_string()
}

pub fn prompt_event_json(session: &str, prompt: &str) -> String {
    serde_json::json!({
        "session_id": session,
        "hook_event_name": "UserPromptSubmit",
        "prompt": prompt,
        "transcript_path": "/tmp/transcript.json",
        "cwd": "/tmp/test"
    })
    .to_string()
}

/// Default database location under a scratch working directory.
pub fn db_path(dir: &Path) -> PathBuf {
    dir.join(".claude").join("activity_metrics.db")
}

pub fn open_db(dir: &Path) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path(dir)).expect("activity database should exist")
}

pub fn count_activity_rows(dir: &Path) -> i64 {
    open_db(dir)
        .query_row("SELECT COUNT(*) FROM activity_log", [], |r| r.get(0))
        .unwrap()
}

/// All (hook_category, tool_identifier, event_data) rows in insertion order.
pub fn activity_rows(dir: &Path) -> Vec<(String, String, String)> {
    let conn = open_db(dir);
    let mut stmt = conn
        .prepare("SELECT hook_category, tool_identifier, event_data FROM activity_log ORDER BY id")
        .unwrap();
    let rows = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    rows
}
