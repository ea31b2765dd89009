// src/config/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{McpmanError, Result};

/// The MCP config document.
///
/// ```json
/// {
///   "mcpServers": {
///     "task-management": {
///       "command": "node",
///       "args": ["task-management/build/index.js"],
///       "env": {}
///     }
///   }
/// }
/// ```
///
/// Top-level keys other than `mcpServers` belong to the host application and
/// are carried through untouched when the file is rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, ServerEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `mcpServers`: how to start a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub command: String,

    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    /// Host-specific keys on the entry, preserved on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerEntry {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: None,
            extra: Map::new(),
        }
    }

    /// `command` and `args` joined with single spaces.
    ///
    /// Nothing is quoted or escaped; the result is handed to the shell as is.
    pub fn command_line(&self) -> String {
        crate::exec::command_line(&self.command, &self.args)
    }

    /// The entry's `env` map, empty when absent.
    pub fn env_overlay(&self) -> BTreeMap<String, String> {
        self.env.clone().unwrap_or_default()
    }
}

impl McpConfig {
    pub fn server(&self, name: &str) -> Option<&ServerEntry> {
        self.mcp_servers.get(name)
    }

    /// Like [`McpConfig::server`], but a missing name is an error.
    pub fn require_server(&self, name: &str) -> Result<&ServerEntry> {
        self.server(name)
            .ok_or_else(|| McpmanError::ServerNotFound(name.to_string()))
    }

    /// Insert or replace a server entry, returning the previous one.
    pub fn upsert_server(&mut self, name: impl Into<String>, entry: ServerEntry) -> Option<ServerEntry> {
        self.mcp_servers.insert(name.into(), entry)
    }

    /// Remove a server entry. Removing an unknown name is a no-op.
    pub fn remove_server(&mut self, name: &str) -> Option<ServerEntry> {
        self.mcp_servers.remove(name)
    }

    /// Set a single environment variable on an existing server, creating its
    /// `env` map when needed.
    pub fn set_env(&mut self, name: &str, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let entry = self
            .mcp_servers
            .get_mut(name)
            .ok_or_else(|| McpmanError::ServerNotFound(name.to_string()))?;
        entry
            .env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        Ok(())
    }

    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.mcp_servers.keys().map(|s| s.as_str())
    }

    /// Pretty-printed JSON with 2-space indentation, as written to disk.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
