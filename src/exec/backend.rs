// src/exec/backend.rs

//! Pluggable process backend.
//!
//! [`launch`](crate::exec::launch) talks to a `ProcessBackend` instead of
//! calling `tokio::process` directly, so tests can replay scripted output
//! without spawning anything.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{McpmanError, Result};
use crate::exec::launch::PreparedLaunch;
use crate::exec::relay::OutputEvent;
use crate::types::StreamKind;

/// Capacity of the per-process output channel.
const OUTPUT_CHANNEL_CAPACITY: usize = 256;

/// A process that has been created and whose output is being read.
///
/// `events` yields stdout and stderr chunks in per-stream order and closes
/// once both streams reach EOF.
#[derive(Debug)]
pub struct SpawnedProcess {
    pub pid: Option<u32>,
    pub events: mpsc::Receiver<OutputEvent>,
}

/// Trait abstracting how a prepared launch becomes a running process.
pub trait ProcessBackend: Send {
    /// Create the process and start forwarding its output.
    ///
    /// Must return as soon as the process exists. An error here means nothing
    /// was started.
    fn spawn(&mut self, launch: &PreparedLaunch) -> Result<SpawnedProcess>;
}

/// Backend that runs the command line through the platform shell with
/// `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for RealProcessBackend {
    fn spawn(&mut self, launch: &PreparedLaunch) -> Result<SpawnedProcess> {
        info!(
            server = %launch.identity,
            cmd = %launch.command_line,
            "starting server process"
        );

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&launch.command_line);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&launch.command_line);
            c
        };

        cmd.envs(&launch.env_overrides)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            McpmanError::Launch(format!(
                "spawning process for server '{}' ({}): {e}",
                launch.identity, launch.command_line
            ))
        })?;

        let pid = child.id();
        let (tx, rx) = mpsc::channel::<OutputEvent>(OUTPUT_CHANNEL_CAPACITY);

        if let Some(stdout) = child.stdout.take() {
            spawn_reader(launch.identity.clone(), StreamKind::Stdout, stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(launch.identity.clone(), StreamKind::Stderr, stderr, tx.clone());
        }
        drop(tx);

        // Stdin stays open for the life of the process; servers that speak
        // over stdio exit on EOF.
        let stdin = child.stdin.take();
        let identity = launch.identity.clone();
        tokio::spawn(async move {
            let _stdin = stdin;
            match child.wait().await {
                Ok(status) => info!(
                    server = %identity,
                    exit_code = status.code().unwrap_or(-1),
                    success = status.success(),
                    "server process exited"
                ),
                Err(e) => warn!(server = %identity, error = %e, "waiting for server process failed"),
            }
        });

        Ok(SpawnedProcess { pid, events: rx })
    }
}

/// Forward each line of `pipe` as an [`OutputEvent`] until EOF.
///
/// Bytes that are not valid UTF-8 are replaced, never dropped. Once the
/// receiving handle is gone the pipe is still drained, so a process that
/// outlives its handle does not block on a full pipe.
fn spawn_reader<R>(identity: String, stream: StreamKind, pipe: R, tx: mpsc::Sender<OutputEvent>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        let mut relaying = true;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) if !relaying => {}
                Ok(_) => {
                    let data = decode_line(&buf);
                    debug!(server = %identity, %stream, "{}", data);
                    if tx.send(OutputEvent { stream, data }).await.is_err() {
                        debug!(server = %identity, %stream, "handle dropped; draining output");
                        relaying = false;
                    }
                }
                Err(e) => {
                    warn!(server = %identity, %stream, error = %e, "reading server output failed");
                    break;
                }
            }
        }

        debug!(server = %identity, %stream, "output reader ended");
    });
}

/// One line without its `\n` or `\r\n` terminator, lossily decoded.
fn decode_line(bytes: &[u8]) -> String {
    let line = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
