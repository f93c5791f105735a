use std::path::{Path, PathBuf};

/// File name of the fallback database under the trusted base directory.
pub const DEFAULT_DB_FILE: &str = "activity_metrics.db";

/// Normalized path substrings that disqualify a database location outright,
/// even when containment would otherwise pass (e.g. via a symlinked base).
const SENSITIVE_DIRS: [&str; 6] = ["/etc/", "/proc/", "/sys/", "/dev/", "/boot/", "/var/log/"];

/// Confine a configured database path to the trusted base directory.
///
/// The candidate and the base are normalized logically against `cwd`
/// (relative segments resolved, `..` and `.` collapsed, no filesystem
/// access) and the candidate is accepted only when it remains a strict
/// descendant of the base and avoids known sensitive directories. Any
/// rejection — traversal, absolute escape, empty input — substitutes the
/// fixed default `<base>/activity_metrics.db`. Total: never fails, never
/// returns a path outside the base.
pub fn validate_db_path(candidate: &str, base: &Path, cwd: &Path) -> PathBuf {
    let cwd_normalized = normalize(&cwd.to_string_lossy(), "/");
    let base_normalized = normalize(&base.to_string_lossy(), &cwd_normalized);
    let fallback = PathBuf::from(format!("{base_normalized}/{DEFAULT_DB_FILE}"));

    if candidate.trim().is_empty() {
        return fallback;
    }

    let resolved = normalize(candidate, &cwd_normalized);

    if !resolved.starts_with(&format!("{base_normalized}/")) {
        return fallback;
    }
    if SENSITIVE_DIRS.iter().any(|dir| resolved.contains(dir)) {
        return fallback;
    }

    PathBuf::from(resolved)
}

/// Logically normalize a path: make absolute against `cwd`, collapse `..`
/// and `.` components and duplicate separators, drop any trailing `/`.
/// Backslashes are treated as separators so Windows-style traversal
/// sequences cannot smuggle `..` segments through.
fn normalize(raw: &str, cwd: &str) -> String {
    let forward = raw.replace('\\', "/");
    let path = if forward.starts_with('/') {
        forward
    } else {
        format!("{cwd}/{forward}")
    };

    let mut components: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }

    if components.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", components.join("/"))
    }
}
