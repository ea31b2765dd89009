// src/config/settings.rs

//! mcpman's own settings, read from an optional TOML file.
//!
//! ```toml
//! [paths]
//! config = "/path/to/claude_desktop_config.json"
//! workspace = "/path/to/writable/data/dir"
//! task_system = "docs/task-management/task-system.md"
//! daily_logs = "docs/logs/daily"
//! ```
//!
//! Every key is optional. A missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::loader::default_config_path;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathsSection,
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// MCP config JSON. Defaults to the desktop host's location.
    #[serde(default)]
    pub config: Option<PathBuf>,

    /// Writable data directory exported to servers as `MCP_WORKSPACE_PATH`.
    #[serde(default)]
    pub workspace: Option<PathBuf>,

    /// Markdown task list.
    #[serde(default)]
    pub task_system: Option<PathBuf>,

    /// Directory holding one `<date>.md` file per day.
    #[serde(default)]
    pub daily_logs: Option<PathBuf>,
}

/// Settings with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub config: PathBuf,
    pub workspace: PathBuf,
    pub task_system: PathBuf,
    pub daily_logs: PathBuf,
}

pub fn default_workspace_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("mcpman"),
        None => PathBuf::from(".mcpman"),
    }
}

pub fn default_task_system_path() -> PathBuf {
    PathBuf::from("docs").join("task-management").join("task-system.md")
}

pub fn default_daily_logs_dir() -> PathBuf {
    PathBuf::from("docs").join("logs").join("daily")
}

impl Settings {
    pub fn resolve(&self) -> ResolvedPaths {
        let paths = &self.paths;
        ResolvedPaths {
            config: paths.config.clone().unwrap_or_else(default_config_path),
            workspace: paths.workspace.clone().unwrap_or_else(default_workspace_path),
            task_system: paths
                .task_system
                .clone()
                .unwrap_or_else(default_task_system_path),
            daily_logs: paths
                .daily_logs
                .clone()
                .unwrap_or_else(default_daily_logs_dir),
        }
    }
}

/// Load settings from `path`, or defaults if it does not exist.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    load_settings_with(&RealFileSystem, path.as_ref())
}

pub fn load_settings_with(fs: &dyn FileSystem, path: &Path) -> Result<Settings> {
    if !fs.exists(path) {
        debug!(path = ?path, "no settings file; using defaults");
        return Ok(Settings::default());
    }

    let contents = fs.read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;
    debug!(path = ?path, ?settings, "settings loaded");
    Ok(settings)
}
