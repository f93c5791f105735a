use chrono::{Duration, Utc};
use rusqlite::{params, Connection, Transaction};

use super::models::{BreakdownRow, EventRecord, SessionSummary, SummaryReport};
use super::schema::StoreError;

/// Persist one event and everything derived from it atomically: the
/// activity row, the session summary upsert, and one `FilterMatch` row per
/// fired filter. A failure anywhere rolls the whole invocation back.
pub fn record_event(
    conn: &mut Connection,
    event: &EventRecord,
    filter_rows: &[EventRecord],
) -> Result<(), StoreError> {
    let tx = conn.transaction()?;
    insert_event(&tx, event)?;
    upsert_session_summary(&tx, event)?;
    for row in filter_rows {
        insert_event(&tx, row)?;
    }
    tx.commit()?;
    Ok(())
}

fn insert_event(tx: &Transaction<'_>, event: &EventRecord) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO activity_log
            (event_timestamp, session_identifier, hook_category, tool_identifier,
             execution_duration, event_data)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event.event_timestamp,
            event.session_identifier,
            event.hook_category,
            event.tool_identifier,
            event.execution_duration,
            event.event_data,
        ],
    )?;
    Ok(())
}

/// Accumulate this event into the session's summary row: first event seeds
/// the row, later events bump the counters, replace the primary tool, and
/// advance the last-seen timestamp.
fn upsert_session_summary(tx: &Transaction<'_>, event: &EventRecord) -> Result<(), StoreError> {
    tx.execute(
        "INSERT INTO session_summary
            (session_identifier, start_timestamp, total_events, total_execution_time, primary_tool)
         VALUES (?1, ?2, 1, ?3, ?4)
         ON CONFLICT(session_identifier) DO UPDATE SET
            total_events = total_events + 1,
            total_execution_time = total_execution_time + excluded.total_execution_time,
            primary_tool = excluded.primary_tool,
            end_timestamp = excluded.start_timestamp",
        params![
            event.session_identifier,
            event.event_timestamp,
            event.execution_duration.unwrap_or(0),
            event.tool_identifier,
        ],
    )?;
    Ok(())
}

pub fn get_session_summary(
    conn: &Connection,
    session_id: &str,
) -> Result<Option<SessionSummary>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT session_identifier, start_timestamp, end_timestamp,
                total_events, total_execution_time, primary_tool
         FROM session_summary WHERE session_identifier = ?1",
    )?;
    let mut rows = stmt.query_map(params![session_id], |row| {
        Ok(SessionSummary {
            session_identifier: row.get(0)?,
            start_timestamp: row.get(1)?,
            end_timestamp: row.get(2)?,
            total_events: row.get(3)?,
            total_execution_time: row.get(4)?,
            primary_tool: row.get(5)?,
        })
    })?;
    rows.next().transpose().map_err(StoreError::from)
}

/// Aggregate the activity log into a report: per `category:tool` counts and
/// average durations, ordered busiest-first. With a session id the report
/// covers that session; without one it covers today's events.
pub fn summary_report(
    conn: &Connection,
    session_id: Option<&str>,
) -> Result<SummaryReport, StoreError> {
    let sql_session = "SELECT hook_category, tool_identifier, COUNT(*) AS cnt,
                              AVG(COALESCE(execution_duration, 0))
                       FROM activity_log
                       WHERE session_identifier = ?1
                       GROUP BY hook_category, tool_identifier
                       ORDER BY cnt DESC";
    let sql_today = "SELECT hook_category, tool_identifier, COUNT(*) AS cnt,
                            AVG(COALESCE(execution_duration, 0))
                     FROM activity_log
                     WHERE DATE(event_timestamp) = DATE('now')
                     GROUP BY hook_category, tool_identifier
                     ORDER BY cnt DESC";

    let groups: Vec<(String, Option<String>, i64, f64)> = match session_id {
        Some(id) => {
            let mut stmt = conn.prepare(sql_session)?;
            let rows = stmt.query_map(params![id], map_group_row)?;
            rows.collect::<Result<_, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(sql_today)?;
            let rows = stmt.query_map([], map_group_row)?;
            rows.collect::<Result<_, _>>()?
        }
    };

    let total_events: i64 = groups.iter().map(|g| g.2).sum();
    let most_used_tool = groups
        .first()
        .and_then(|g| g.1.clone())
        .unwrap_or_else(|| "None".to_string());
    let average_execution_time = if groups.is_empty() {
        0.0
    } else {
        groups.iter().map(|g| g.3).sum::<f64>() / groups.len() as f64
    };
    let event_breakdown = groups
        .into_iter()
        .map(|(category, tool, count, avg)| BreakdownRow {
            key: match tool.as_deref() {
                Some(t) if !t.is_empty() => format!("{category}:{t}"),
                _ => category,
            },
            count,
            avg_execution_time: avg,
        })
        .collect();

    Ok(SummaryReport {
        total_events,
        event_breakdown,
        most_used_tool,
        average_execution_time,
    })
}

fn map_group_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, Option<String>, i64, f64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Drop activity and insight rows older than the retention window.
/// Returns the number of rows deleted.
pub fn cleanup_old_data(conn: &Connection, cleanup_days: u32) -> Result<usize, StoreError> {
    let cutoff = Utc::now() - Duration::days(i64::from(cleanup_days));
    let deleted_events = conn.execute(
        "DELETE FROM activity_log WHERE event_timestamp < ?1",
        params![cutoff.to_rfc3339()],
    )?;
    let deleted_insights = conn.execute(
        "DELETE FROM activity_insights WHERE insight_date < ?1",
        params![cutoff.format("%Y-%m-%d").to_string()],
    )?;
    Ok(deleted_events + deleted_insights)
}
