// src/config/validate.rs

//! Structural checks on the parsed JSON before it becomes an [`McpConfig`].
//!
//! Only shape is checked: the values themselves (commands, paths) are not
//! inspected.

use serde_json::Value;

use crate::config::model::McpConfig;
use crate::errors::{McpmanError, Result};

impl TryFrom<Value> for McpConfig {
    type Error = McpmanError;

    fn try_from(raw: Value) -> std::result::Result<Self, Self::Error> {
        validate_shape(&raw)?;
        serde_json::from_value(raw).map_err(|e| McpmanError::ConfigValidation(e.to_string()))
    }
}

pub fn validate_shape(raw: &Value) -> Result<()> {
    let root = raw.as_object().ok_or_else(|| {
        McpmanError::ConfigValidation("config root must be a JSON object".to_string())
    })?;

    let servers = root
        .get("mcpServers")
        .ok_or_else(|| McpmanError::ConfigValidation("missing `mcpServers` key".to_string()))?
        .as_object()
        .ok_or_else(|| {
            McpmanError::ConfigValidation("`mcpServers` must be an object".to_string())
        })?;

    for (name, server) in servers {
        validate_server(name, server)?;
    }

    Ok(())
}

fn validate_server(name: &str, server: &Value) -> Result<()> {
    let obj = server.as_object().ok_or_else(|| {
        McpmanError::ConfigValidation(format!("server '{name}' must be an object"))
    })?;

    match obj.get("command") {
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(McpmanError::ConfigValidation(format!(
                "server '{name}' command must be a string"
            )));
        }
        None => {
            return Err(McpmanError::ConfigValidation(format!(
                "server '{name}' is missing `command`"
            )));
        }
    }

    match obj.get("args") {
        Some(Value::Array(args)) => {
            if !args.iter().all(Value::is_string) {
                return Err(McpmanError::ConfigValidation(format!(
                    "server '{name}' args must all be strings"
                )));
            }
        }
        _ => {
            return Err(McpmanError::ConfigValidation(format!(
                "server '{name}' must include an `args` array"
            )));
        }
    }

    if let Some(env) = obj.get("env") {
        let env = env.as_object().ok_or_else(|| {
            McpmanError::ConfigValidation(format!("server '{name}' env must be an object"))
        })?;
        for (key, value) in env {
            if key.is_empty() {
                return Err(McpmanError::ConfigValidation(format!(
                    "server '{name}' has an empty environment variable key"
                )));
            }
            if !value.is_string() {
                return Err(McpmanError::ConfigValidation(format!(
                    "server '{name}' environment variable {key} must be a string"
                )));
            }
        }
    }

    Ok(())
}
