//! Thin orchestration over the validators, the filter evaluator, and the
//! store. This is the only module that sequences side effects; everything
//! it calls is total or returns a `Result` that is absorbed here.

pub mod metadata;

use chrono::Utc;
use serde_json::json;

use crate::config::{Config, FilterDef};
use crate::db::models::EventRecord;
use crate::db::{self, StoreError};
use crate::domain::{execution_duration, HookCategory, SessionId, ToolId};
use crate::filter::{matching_filters, EventFields};
use crate::logging::{LogLevel, MonitorLog};
use crate::protocol::RawEvent;

use metadata::{extract_metadata, Metadata};

/// The validated identity of one incoming event.
#[derive(Debug)]
pub struct ParsedEvent {
    pub category: HookCategory,
    pub tool: ToolId,
    pub session: SessionId,
}

impl ParsedEvent {
    /// Run the field validators over a raw event. Total — hostile input
    /// degrades to safe substitutes, never to an error.
    pub fn from_raw(raw: &RawEvent) -> Self {
        ParsedEvent {
            category: HookCategory::validate(raw.hook_event_name.as_deref().unwrap_or("")),
            tool: ToolId::validate(raw.tool_name.as_deref()),
            session: SessionId::validate(raw.session_id.as_deref()),
        }
    }
}

/// What one hook invocation amounted to. Purely informational — every
/// variant still exits 0.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Event row written, with this many filter matches alongside.
    Recorded { filter_matches: usize },
    /// Deliberately not recorded (disabled, excluded, non-recordable).
    Skipped,
    /// Stop event: summary logged, retention cleanup done.
    SessionClosed,
    /// A storage failure was caught and logged.
    Failed,
}

/// Decide whether an event should be recorded at all.
///
/// Monitoring can be disabled wholesale, per tool (`excluded_tools`), per
/// category (`hook_types` allowlist), or per capture class (tool usage /
/// user prompts).
pub fn should_monitor(parsed: &ParsedEvent, config: &Config) -> bool {
    let monitoring = &config.monitoring;
    if !monitoring.enabled {
        return false;
    }
    if monitoring
        .excluded_tools
        .iter()
        .any(|t| t == parsed.tool.as_str())
    {
        return false;
    }
    if !monitoring.hook_types.is_empty()
        && !monitoring
            .hook_types
            .iter()
            .any(|h| h == parsed.category.as_str())
    {
        return false;
    }
    match parsed.category {
        HookCategory::PreToolUse | HookCategory::PostToolUse => monitoring.capture_tool_usage,
        HookCategory::UserPromptSubmit => monitoring.capture_user_prompts,
        _ => true,
    }
}

/// Process one hook event end to end. Never fails: every error is absorbed
/// into the diagnostic log and an [`Outcome`].
pub fn handle_event(raw: &RawEvent, config: &Config, log: &MonitorLog) -> Outcome {
    let parsed = ParsedEvent::from_raw(raw);

    match parsed.category {
        HookCategory::Stop => handle_stop(&parsed, config, log),
        category if category.is_recordable() => {
            if !should_monitor(&parsed, config) {
                return Outcome::Skipped;
            }
            match record_activity(raw, &parsed, config, log) {
                Ok(filter_matches) => {
                    log.record(
                        LogLevel::Info,
                        format!(
                            "recorded {} activity for {}",
                            parsed.category, parsed.tool
                        ),
                    );
                    Outcome::Recorded { filter_matches }
                }
                Err(e) => {
                    log.record(LogLevel::Error, format!("failed to record activity: {e}"));
                    Outcome::Failed
                }
            }
        }
        _ => {
            tracing::debug!("ignoring {} event", parsed.category);
            Outcome::Skipped
        }
    }
}

/// Sanitize, persist, and filter-match one recordable event. The event row,
/// the session summary upsert, and any filter-match rows commit together.
fn record_activity(
    raw: &RawEvent,
    parsed: &ParsedEvent,
    config: &Config,
    log: &MonitorLog,
) -> Result<usize, StoreError> {
    let timestamp = Utc::now().to_rfc3339();
    let meta = extract_metadata(raw, parsed.category, &parsed.tool, &timestamp);
    let duration = execution_duration(raw);

    let event_row = EventRecord {
        event_timestamp: timestamp.clone(),
        session_identifier: parsed.session.as_str().to_string(),
        hook_category: parsed.category.as_str().to_string(),
        tool_identifier: parsed.tool.as_str().to_string(),
        execution_duration: duration,
        event_data: meta.to_json(),
    };

    let fields = derive_fields(parsed, duration, &meta);
    let matched = matching_filters(&config.filters, &fields);
    let filter_rows: Vec<EventRecord> = matched
        .iter()
        .map(|f| filter_match_row(f, parsed, &timestamp))
        .collect();

    let mut conn = db::open_db(&config.resolved_database_path())?;
    db::queries::record_event(&mut conn, &event_row, &filter_rows)?;

    for f in &matched {
        log.record(LogLevel::Info, format!("activity filter '{}' triggered", f.name));
    }
    Ok(filter_rows.len())
}

/// The flat field mapping the filter conditions see.
fn derive_fields(parsed: &ParsedEvent, duration: Option<i64>, meta: &Metadata) -> EventFields {
    EventFields {
        content_size: meta.input_size,
        execution_time: duration.unwrap_or(0),
        prompt_character_count: meta.prompt_character_count,
        tool_identifier: parsed.tool.as_str().to_string(),
        hook_category: parsed.category.as_str().to_string(),
    }
}

/// Build the extra activity row recording a filter match. The filter's name
/// doubles as the row's tool identifier so summaries group by filter.
fn filter_match_row(filter: &FilterDef, parsed: &ParsedEvent, timestamp: &str) -> EventRecord {
    EventRecord {
        event_timestamp: timestamp.to_string(),
        session_identifier: parsed.session.as_str().to_string(),
        hook_category: HookCategory::FilterMatch.as_str().to_string(),
        tool_identifier: filter.name.clone(),
        execution_duration: None,
        event_data: json!({
            "filter_name": filter.name,
            "description": filter.description,
            "condition": filter.condition,
            "original_event": parsed.category.as_str(),
            "triggered_by": parsed.tool.as_str(),
        })
        .to_string(),
    }
}

/// Stop event: write the session's summary report to the diagnostic log,
/// then apply retention cleanup.
fn handle_stop(parsed: &ParsedEvent, config: &Config, log: &MonitorLog) -> Outcome {
    let db_path = config.resolved_database_path();
    match db::open_db(&db_path) {
        Ok(conn) => {
            match db::queries::summary_report(&conn, Some(parsed.session.as_str())) {
                Ok(report) => log.record(
                    LogLevel::Info,
                    format!("session ended: {} events recorded", report.total_events),
                ),
                Err(e) => log.record(LogLevel::Error, format!("failed to generate summary: {e}")),
            }
            match db::queries::cleanup_old_data(&conn, config.storage.cleanup_days) {
                Ok(0) => {}
                Ok(n) => log.record(LogLevel::Info, format!("cleaned up {n} old activity records")),
                Err(e) => log.record(LogLevel::Error, format!("data cleanup failed: {e}")),
            }
            Outcome::SessionClosed
        }
        Err(e) => {
            log.record(LogLevel::Error, format!("failed to open database: {e}"));
            Outcome::Failed
        }
    }
}
