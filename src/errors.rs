// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpmanError {
    /// Config file missing, unreadable, or not valid JSON.
    #[error("Config read error: {0}")]
    ConfigRead(String),

    /// Parsed JSON does not have the `mcpServers` shape.
    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    /// The external command could not be started.
    #[error("Launch failed: {0}")]
    Launch(String),

    #[error("Server not found in config: {0}")]
    ServerNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl McpmanError {
    /// Both config failure kinds put the caller into the same
    /// "no configuration loaded" state.
    pub fn is_config_failure(&self) -> bool {
        matches!(
            self,
            McpmanError::ConfigRead(_) | McpmanError::ConfigValidation(_)
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, McpmanError>;
