use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::logging::{LogLevel, MonitorLog};
use crate::monitor;
use crate::protocol::{RawEvent, MAX_JSON_SIZE};

/// Why a stdin payload was rejected before any side effect.
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("stdin payload exceeds {MAX_JSON_SIZE} bytes")]
    TooLarge,
    #[error("empty stdin payload")]
    Empty,
    #[error("failed to read stdin: {0}")]
    Unreadable(#[from] std::io::Error),
}

/// Execute the hook subcommand: read one JSON event from stdin, record it,
/// return. The caller (main) exits 0 on return — this function has no
/// failure path by design; the host must never see a nonzero exit or a
/// blocked pipe from its telemetry hook. All problems end up in the
/// diagnostic log instead.
pub fn run(config_path: Option<&Path>) {
    let log = MonitorLog::at_default();
    let config = Config::load_or_default(config_path);

    let payload = match read_stdin() {
        Ok(payload) => payload,
        Err(e) => {
            log.record(LogLevel::Error, format!("rejected input: {e}"));
            return;
        }
    };

    let raw = match RawEvent::parse(&payload) {
        Ok(raw) => raw,
        Err(_) => {
            log.record(LogLevel::Error, "invalid JSON input received");
            return;
        }
    };

    let outcome = monitor::handle_event(&raw, &config, &log);
    tracing::debug!("hook finished: {outcome:?}");
}

/// Read stdin with a hard size cap. One extra byte past the cap is enough
/// to reject without draining an unbounded pipe.
fn read_stdin() -> Result<String, InputError> {
    let mut payload = String::new();
    std::io::stdin()
        .take(MAX_JSON_SIZE as u64 + 1)
        .read_to_string(&mut payload)?;
    if payload.len() > MAX_JSON_SIZE {
        return Err(InputError::TooLarge);
    }
    if payload.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(payload)
}
