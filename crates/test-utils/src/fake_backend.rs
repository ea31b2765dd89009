use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use mcpman::errors::{McpmanError, Result};
use mcpman::exec::{OutputEvent, PreparedLaunch, ProcessBackend, SpawnedProcess};

/// A fake process backend that:
/// - records every launch it was asked to perform
/// - replays a fixed list of output events for each spawned "process"
/// - optionally keeps the output channel open (a server that stays up), or
///   fails every spawn.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessBackend {
    script: Vec<OutputEvent>,
    keep_open: bool,
    fail_with: Option<String>,
    launched: Arc<Mutex<Vec<PreparedLaunch>>>,
    open_senders: Arc<Mutex<Vec<mpsc::Sender<OutputEvent>>>>,
}

impl FakeProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(events: Vec<OutputEvent>) -> Self {
        Self {
            script: events,
            ..Self::default()
        }
    }

    /// Keep the output channel open after the script is replayed.
    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    /// Make every spawn fail as if the process could not be created.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Launches seen so far.
    pub fn launched(&self) -> Vec<PreparedLaunch> {
        self.launched.lock().unwrap().clone()
    }

    /// Sender for the most recent kept-open process, to push more output.
    pub fn last_sender(&self) -> Option<mpsc::Sender<OutputEvent>> {
        self.open_senders.lock().unwrap().last().cloned()
    }

    /// Close every kept-open channel, as if the processes exited.
    pub fn close_all(&self) {
        self.open_senders.lock().unwrap().clear();
    }
}

impl ProcessBackend for FakeProcessBackend {
    fn spawn(&mut self, launch: &PreparedLaunch) -> Result<SpawnedProcess> {
        if let Some(message) = &self.fail_with {
            return Err(McpmanError::Launch(message.clone()));
        }

        self.launched.lock().unwrap().push(launch.clone());

        let (tx, rx) = mpsc::channel(self.script.len().max(1) + 16);
        for event in &self.script {
            tx.try_send(event.clone())
                .map_err(|e| McpmanError::Other(anyhow::anyhow!("fake backend: {e}")))?;
        }

        if self.keep_open {
            self.open_senders.lock().unwrap().push(tx);
        }

        Ok(SpawnedProcess {
            pid: None,
            events: rx,
        })
    }
}
