use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file location, relative to the workspace the host runs in.
pub const DEFAULT_CONFIG_PATH: &str = ".claude/activity-monitor.toml";

/// Trusted base directory for storage; the database path is confined here.
pub const STORAGE_BASE_DIR: &str = ".claude";

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitoring: MonitoringConfig,
    pub storage: StorageConfig,
    pub filters: Vec<FilterDef>,
}

/// Monitoring toggles: what gets recorded at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub capture_tool_usage: bool,
    pub capture_user_prompts: bool,
    /// Tools never recorded, matched against the validated tool id.
    pub excluded_tools: Vec<String>,
    /// Category allowlist; empty means all categories.
    pub hook_types: Vec<String>,
}

/// Storage location and retention.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: String,
    pub cleanup_days: u32,
}

/// A user-defined threshold filter evaluated against every recorded event.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterDef {
    pub name: String,
    pub condition: String,
    pub description: String,
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid TOML syntax: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl Config {
    /// Load a config from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a TOML string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config, falling back to the hardcoded defaults when the file
    /// is absent or unparsable. The hook must keep recording with a broken
    /// config, so this path never fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("config at {} unusable, using defaults: {e}", path.display());
                Self::default()
            }
        }
    }

    /// The configured database path, confined to the trusted storage base.
    pub fn resolved_database_path(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        crate::path::validate_db_path(
            &self.storage.database_path,
            Path::new(STORAGE_BASE_DIR),
            &cwd,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            monitoring: MonitoringConfig::default(),
            storage: StorageConfig::default(),
            filters: vec![
                FilterDef {
                    name: "large_operations".to_string(),
                    condition: "content_size > 50000".to_string(),
                    description: "Track large content operations".to_string(),
                },
                FilterDef {
                    name: "slow_commands".to_string(),
                    condition: "execution_time > 5000".to_string(),
                    description: "Track slow command executions".to_string(),
                },
            ],
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        MonitoringConfig {
            enabled: true,
            capture_tool_usage: true,
            capture_user_prompts: true,
            excluded_tools: Vec::new(),
            hook_types: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: format!("{STORAGE_BASE_DIR}/activity_metrics.db"),
            cleanup_days: 30,
        }
    }
}

impl Default for FilterDef {
    fn default() -> Self {
        FilterDef {
            name: String::new(),
            condition: String::new(),
            description: String::new(),
        }
    }
}
