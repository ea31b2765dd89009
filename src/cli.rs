// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::Status;

/// Command-line arguments for `mcpman`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcpman",
    version,
    about = "Edit MCP server config, launch servers, and keep the task log in sync.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to mcpman's own settings file (TOML). Optional.
    #[arg(long, value_name = "PATH", default_value = "Mcpman.toml", global = true)]
    pub settings: PathBuf,

    /// Path to the MCP config JSON, overriding the settings file.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MCPMAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Inspect or edit the `mcpServers` entries of the config file.
    Servers {
        /// Print the resulting config instead of writing it.
        #[arg(long)]
        dry_run: bool,

        #[command(subcommand)]
        action: ServersCommand,
    },

    /// Launch a configured server and relay its output.
    Launch(LaunchArgs),

    /// Work with the markdown task list and the daily log.
    Tasks {
        #[command(subcommand)]
        action: TasksCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ServersCommand {
    /// List configured servers.
    List,

    /// Add a server, replacing any entry with the same name.
    Add {
        name: String,

        #[arg(long)]
        command: String,

        /// One argument; repeat for more.
        #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
        args: Vec<String>,

        /// `KEY=VALUE`; repeat for more.
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        env: Vec<(String, String)>,
    },

    /// Remove a server. Unknown names are ignored.
    Remove { name: String },

    /// Set one environment variable on a server.
    SetEnv {
        name: String,
        key: String,
        value: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct LaunchArgs {
    /// Server name as it appears under `mcpServers`.
    pub name: String,

    /// Exported as `MCP_PROJECT_ID`; defaults to "default".
    #[arg(long, value_name = "ID")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TasksCommand {
    /// Print the parsed task tree.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the task list regenerated from its parsed form.
    Format,

    /// Change a task's status and record it in the daily log.
    SetStatus {
        title: String,

        /// pending, in-progress or completed.
        status: Status,

        /// Hours spent, added to the task's category in the log.
        #[arg(long, default_value_t = 0.0)]
        hours: f64,

        /// Log date (YYYY-MM-DD); defaults to today (UTC).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
