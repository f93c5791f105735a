use serde::Serialize;

/// One row of the append-only activity log, ready for insertion.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event_timestamp: String,
    pub session_identifier: String,
    pub hook_category: String,
    pub tool_identifier: String,
    pub execution_duration: Option<i64>,
    /// Sanitized metadata blob, serialized JSON.
    pub event_data: String,
}

/// One row of the per-session summary table.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_identifier: String,
    pub start_timestamp: String,
    pub end_timestamp: Option<String>,
    pub total_events: i64,
    pub total_execution_time: i64,
    pub primary_tool: Option<String>,
}

/// Aggregated activity report, printed by the `summary` subcommand and
/// logged on session stop.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub total_events: i64,
    pub event_breakdown: Vec<BreakdownRow>,
    pub most_used_tool: String,
    pub average_execution_time: f64,
}

/// One `category:tool` group of the report.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownRow {
    pub key: String,
    pub count: i64,
    pub avg_execution_time: f64,
}
