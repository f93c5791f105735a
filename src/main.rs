use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Activity logging hook for Claude Code with threshold-based filters.
#[derive(Debug, Parser)]
#[command(name = "claude-activity-hook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run as a Claude Code lifecycle hook (reads one JSON event on stdin)
    Hook {
        /// Path to the TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print an aggregated activity report as JSON
    Summary {
        /// Path to the TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Restrict the report to one session id (default: today's events)
        #[arg(long)]
        session: Option<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hook { config } => claude_activity_hook::run_hook(config.as_deref()),
        Commands::Summary { config, session } => {
            if let Err(e) = claude_activity_hook::run_summary(config.as_deref(), session.as_deref())
            {
                eprintln!("summary failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Diagnostics go to stderr only — the host owns stdout and the exit code.
/// Quiet by default; `RUST_LOG` opts in.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
