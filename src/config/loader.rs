// src/config/loader.rs

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::model::McpConfig;
use crate::errors::{McpmanError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Read the config file and parse it as JSON.
///
/// This does **not** check the `mcpServers` shape; use
/// [`load_and_validate`] for that. Any failure here is a
/// [`McpmanError::ConfigRead`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Value> {
    load_with(&RealFileSystem, path.as_ref())
}

/// Load the config file and check its shape.
///
/// - missing/unreadable file or invalid JSON -> `ConfigRead`
/// - JSON without the `mcpServers` shape -> `ConfigValidation`
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<McpConfig> {
    load_and_validate_with(&RealFileSystem, path.as_ref())
}

pub fn load_with(fs: &dyn FileSystem, path: &Path) -> Result<Value> {
    let contents = fs
        .read_to_string(path)
        .map_err(|e| McpmanError::ConfigRead(format!("{e:#}")))?;

    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| McpmanError::ConfigRead(format!("invalid JSON in {:?}: {e}", path)))?;

    debug!(path = ?path, "config file parsed");
    Ok(value)
}

pub fn load_and_validate_with(fs: &dyn FileSystem, path: &Path) -> Result<McpConfig> {
    let raw = load_with(fs, path)?;
    let config = McpConfig::try_from(raw)?;
    info!(path = ?path, servers = config.mcp_servers.len(), "config loaded");
    Ok(config)
}

/// Write the whole config, pretty-printed with 2-space indentation.
///
/// Plain overwrite: no backup and no atomic rename.
pub fn save_to_path(path: impl AsRef<Path>, config: &McpConfig) -> Result<()> {
    save_with(&RealFileSystem, path.as_ref(), config)
}

pub fn save_with(fs: &dyn FileSystem, path: &Path, config: &McpConfig) -> Result<()> {
    let json = config.to_pretty_json()?;
    fs.write(path, json.as_bytes())?;
    info!(path = ?path, servers = config.mcp_servers.len(), "config written");
    Ok(())
}

/// Where the desktop host keeps its MCP config.
///
/// `<config dir>/Claude/claude_desktop_config.json`, which on macOS is
/// `~/Library/Application Support/Claude/...`. Falls back to the bare file
/// name in the working directory when no config dir is known.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("Claude").join("claude_desktop_config.json"),
        None => PathBuf::from("claude_desktop_config.json"),
    }
}
