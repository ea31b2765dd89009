// src/config/mod.rs

//! Configuration for mcpman.
//!
//! Responsibilities:
//! - Define the JSON-backed MCP server config (`model.rs`).
//! - Check the `mcpServers` shape before typed deserialization (`validate.rs`).
//! - Read and write the config file (`loader.rs`).
//! - Load mcpman's own optional TOML settings (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, save_to_path};
pub use model::{McpConfig, ServerEntry};
pub use settings::{load_settings, PathsSection, ResolvedPaths, Settings};
pub use validate::validate_shape;
