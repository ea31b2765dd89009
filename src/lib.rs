// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod tasklog;
pub mod tasks;
pub mod types;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::{CliArgs, Command, LaunchArgs, ServersCommand, TasksCommand};
use crate::config::loader::{load_and_validate, save_to_path};
use crate::config::{load_settings, McpConfig, ResolvedPaths, ServerEntry};
use crate::engine::supervise;
use crate::exec::{launch, LaunchRequest, RealProcessBackend};
use crate::fs::RealFileSystem;
use crate::tasklog::TaskTracker;
use crate::tasks::{format_tasks, TaskNode};
use crate::types::StreamKind;

/// High-level entry point used by `main.rs`.
///
/// Resolves settings (settings file, then `--config`), then dispatches to the
/// subcommand.
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_settings(&args.settings)?;
    let mut paths = settings.resolve();
    if let Some(config) = args.config {
        paths.config = config;
    }
    info!(?paths, "resolved paths");

    match args.command {
        Command::Servers { dry_run, action } => run_servers(&paths, action, dry_run),
        Command::Launch(launch_args) => run_launch(&paths, launch_args).await,
        Command::Tasks { action } => run_tasks(&paths, action),
    }
}

fn run_servers(paths: &ResolvedPaths, action: ServersCommand, dry_run: bool) -> Result<()> {
    match action {
        ServersCommand::List => {
            let cfg = load_and_validate(&paths.config)?;
            print_servers(&cfg);
            Ok(())
        }
        ServersCommand::Add {
            name,
            command,
            args,
            env,
        } => edit_config(paths, dry_run, |cfg| {
            let mut entry = ServerEntry::new(command, args);
            if !env.is_empty() {
                entry.env = Some(env.into_iter().collect());
            }
            if cfg.upsert_server(name.clone(), entry).is_some() {
                info!(server = %name, "replaced existing server entry");
            } else {
                info!(server = %name, "added server entry");
            }
            Ok(())
        }),
        ServersCommand::Remove { name } => edit_config(paths, dry_run, |cfg| {
            if cfg.remove_server(&name).is_none() {
                info!(server = %name, "no such server; nothing removed");
            }
            Ok(())
        }),
        ServersCommand::SetEnv { name, key, value } => {
            edit_config(paths, dry_run, |cfg| cfg.set_env(&name, key, value))
        }
    }
}

/// Load (or start an empty) config, apply `edit`, then write it back or,
/// with `dry_run`, print it.
fn edit_config<F>(paths: &ResolvedPaths, dry_run: bool, edit: F) -> Result<()>
where
    F: FnOnce(&mut McpConfig) -> errors::Result<()>,
{
    let mut cfg = if paths.config.exists() {
        load_and_validate(&paths.config)?
    } else {
        warn!(path = ?paths.config, "config file missing; starting from an empty config");
        McpConfig::default()
    };

    edit(&mut cfg)?;

    if dry_run {
        println!("{}", cfg.to_pretty_json()?);
        return Ok(());
    }

    save_to_path(&paths.config, &cfg)?;
    Ok(())
}

fn print_servers(cfg: &McpConfig) {
    if cfg.mcp_servers.is_empty() {
        println!("no servers configured");
        return;
    }

    println!("servers ({}):", cfg.mcp_servers.len());
    for (name, entry) in cfg.mcp_servers.iter() {
        println!("  - {name}");
        println!("      cmd: {}", entry.command_line());
        if let Some(env) = &entry.env {
            if !env.is_empty() {
                let keys: Vec<_> = env.keys().collect();
                println!("      env: {:?}", keys);
            }
        }
    }
}

async fn run_launch(paths: &ResolvedPaths, args: LaunchArgs) -> Result<()> {
    let cfg = load_and_validate(&paths.config)?;
    let entry = cfg.require_server(&args.name)?;

    std::fs::create_dir_all(&paths.workspace)
        .with_context(|| format!("creating workspace dir {:?}", paths.workspace))?;

    let request = LaunchRequest::from_entry(&args.name, entry, args.project_id);
    let mut backend = RealProcessBackend::new();
    let mut handle = launch(&mut backend, request, &paths.workspace)?;

    handle.subscribe(StreamKind::Stdout, |event| println!("[stdout] {}", event.data));
    handle.subscribe(StreamKind::Stderr, |event| println!("[stderr] {}", event.data));

    // Ctrl-C -> stop relaying.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let status = supervise(&mut handle, shutdown).await;
    info!(server = %args.name, %status, "launch finished");
    Ok(())
}

fn run_tasks(paths: &ResolvedPaths, action: TasksCommand) -> Result<()> {
    let tracker = TaskTracker::new(
        RealFileSystem,
        paths.task_system.clone(),
        paths.daily_logs.clone(),
    );

    match action {
        TasksCommand::Show { json } => {
            let tasks = tracker.load_tasks()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_task_tree(&tasks);
            }
        }
        TasksCommand::Format => {
            let tasks = tracker.load_tasks()?;
            print!("{}", format_tasks(&tasks));
        }
        TasksCommand::SetStatus {
            title,
            status,
            hours,
            date,
        } => {
            let date = date.unwrap_or_else(tasklog::today);
            let entry = tracker.set_status(&title, status, hours, date)?;
            println!(
                "{title}: {status} (log {:?})",
                tracker.log_path(entry.date)
            );
        }
    }

    Ok(())
}

fn print_task_tree(tasks: &[TaskNode]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }

    for task in tasks {
        println!("[{}] {} ({})", task.status, task.title, task.priority);
        for sub in &task.subtasks {
            println!("    [{}] {}", sub.status, sub.title);
        }
    }
}
