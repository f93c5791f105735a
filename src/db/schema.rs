use std::path::Path;

use rusqlite::Connection;

/// Errors from the storage layer. Callers above `monitor` never see these —
/// the hook converts them into a logged, non-fatal outcome.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn initialize_db(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS activity_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_timestamp TEXT NOT NULL,
            session_identifier TEXT NOT NULL,
            hook_category TEXT NOT NULL,
            tool_identifier TEXT,
            execution_duration INTEGER,
            event_data TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS session_summary (
            session_identifier TEXT PRIMARY KEY,
            start_timestamp TEXT NOT NULL,
            end_timestamp TEXT,
            total_events INTEGER DEFAULT 0,
            total_execution_time INTEGER DEFAULT 0,
            primary_tool TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS activity_insights (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            insight_date DATE NOT NULL,
            insight_type TEXT NOT NULL,
            insight_data TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_activity_session ON activity_log(session_identifier);
        CREATE INDEX IF NOT EXISTS idx_activity_timestamp ON activity_log(event_timestamp);
        CREATE INDEX IF NOT EXISTS idx_insights_date ON activity_insights(insight_date);
        ",
    )?;
    Ok(())
}

/// Open (creating if needed) the activity database at `path` and ensure the
/// schema exists. One connection per hook invocation; SQLite's own locking
/// serializes concurrent hook processes.
pub fn open_db(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=2000;")?;
    initialize_db(&conn)?;
    Ok(conn)
}
