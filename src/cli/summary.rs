use std::path::Path;

use crate::config::Config;
use crate::db;

/// Execute the summary subcommand: print the aggregated activity report as
/// JSON to stdout.
///
/// With `--session` the report covers that session, otherwise today's
/// events. Unlike the hook path this is operator-facing and may fail — the
/// exit-0 contract binds only the hook.
pub fn run(
    config_path: Option<&Path>,
    session: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(config_path);
    let conn = db::open_db(&config.resolved_database_path())?;
    let report = db::queries::summary_report(&conn, session)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
