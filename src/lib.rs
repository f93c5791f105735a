pub mod config;
pub mod db;
pub mod domain;
pub mod filter;
pub mod logging;
pub mod monitor;
pub mod protocol;

pub(crate) mod cli;
pub(crate) mod path;

/// Run the hook subcommand: read one JSON event from stdin, record it, and
/// return — the process then exits 0 no matter what happened internally.
///
/// This is the binary entry point. It exists to bridge the binary crate
/// (`main.rs`) to the library without exposing `cli` internals. Not a
/// stable integration API — callers should use [`monitor::handle_event`]
/// and [`config::Config`] directly.
pub fn run_hook(config_path: Option<&std::path::Path>) {
    cli::hook::run(config_path)
}

/// Run the summary subcommand: print an aggregated activity report as JSON.
pub fn run_summary(
    config_path: Option<&std::path::Path>,
    session: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    cli::summary::run(config_path, session)
}
