//! Operator-facing diagnostic log.
//!
//! A JSON array file capped at [`MAX_LOG_ENTRIES`], rewritten in full on
//! every append (read-modify-write — the cap makes a true append
//! impractical). Every write also forwards to `tracing` for stderr
//! diagnostics. Nothing here may ever fail outward: logging failures are
//! swallowed, because a broken log must not take the hook down with it.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default log file location, relative to the workspace the host runs in.
pub const DEFAULT_LOG_PATH: &str = "logs/activity_monitor.json";

/// Maximum entries kept in the log file; older entries are dropped.
pub const MAX_LOG_ENTRIES: usize = 500;

const LOG_CATEGORY: &str = "activity_monitor";

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single structured diagnostic entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    /// Ambient session id from `$CLAUDE_SESSION_ID`, not the validated
    /// per-event id — the log exists even when no event parses.
    pub session_id: String,
}

/// Handle on the capped diagnostic log file.
pub struct MonitorLog {
    path: PathBuf,
}

impl MonitorLog {
    pub fn new(path: PathBuf) -> Self {
        MonitorLog { path }
    }

    pub fn at_default() -> Self {
        Self::new(PathBuf::from(DEFAULT_LOG_PATH))
    }

    /// Append a diagnostic entry, dropping the oldest entries beyond the
    /// cap. Failures are swallowed after a `tracing` breadcrumb.
    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
        }

        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            level,
            category: LOG_CATEGORY.to_string(),
            message,
            session_id: std::env::var("CLAUDE_SESSION_ID")
                .unwrap_or_else(|_| "unknown".to_string()),
        };
        if let Err(e) = self.append(entry) {
            tracing::debug!("diagnostic log write failed: {e}");
        }
    }

    fn append(&self, entry: LogEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // A corrupt or missing file starts the log over rather than erroring.
        let mut entries: Vec<LogEntry> = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        entries.push(entry);
        if entries.len() > MAX_LOG_ENTRIES {
            let excess = entries.len() - MAX_LOG_ENTRIES;
            entries.drain(..excess);
        }

        let serialized = serde_json::to_string_pretty(&entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, serialized)
    }
}
