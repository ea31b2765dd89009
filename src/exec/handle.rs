// src/exec/handle.rs

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::engine::{ConnectionMonitor, StatusChange};
use crate::exec::backend::SpawnedProcess;
use crate::exec::launch::PreparedLaunch;
use crate::exec::relay::{ListenerId, OutputEvent, OutputRelay};
use crate::types::{ConnectionStatus, StreamKind};

/// Runtime state of one launched server.
///
/// The handle owns its listener registry and its output channel. Listeners
/// only run from [`ServerProcessHandle::dispatch_next`], on whichever task
/// owns the handle. Dropping or stopping the handle releases both streams.
#[derive(Debug)]
pub struct ServerProcessHandle {
    launch: PreparedLaunch,
    pid: Option<u32>,
    relay: OutputRelay,
    events: Option<mpsc::Receiver<OutputEvent>>,
    monitor: ConnectionMonitor,
    transitions: Vec<StatusChange>,
}

impl ServerProcessHandle {
    pub(crate) fn new(launch: PreparedLaunch, spawned: SpawnedProcess) -> Self {
        let mut monitor = ConnectionMonitor::new();
        let change = monitor.on_launch(Instant::now());
        let mut handle = Self {
            launch,
            pid: spawned.pid,
            relay: OutputRelay::new(),
            events: Some(spawned.events),
            monitor,
            transitions: Vec::new(),
        };
        handle.record(change);
        handle
    }

    pub fn identity(&self) -> &str {
        &self.launch.identity
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn command_line(&self) -> &str {
        &self.launch.command_line
    }

    /// The environment the child was started with.
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.launch.environment
    }

    pub fn status(&self) -> ConnectionStatus {
        self.monitor.status()
    }

    pub fn last_heartbeat(&self) -> Option<Instant> {
        self.monitor.last_heartbeat()
    }

    /// Every status change so far, oldest first.
    pub fn transitions(&self) -> &[StatusChange] {
        &self.transitions
    }

    /// Whether output is still being relayed.
    pub fn is_active(&self) -> bool {
        self.events.is_some()
    }

    pub fn subscribe<F>(&mut self, stream: StreamKind, listener: F) -> ListenerId
    where
        F: FnMut(&OutputEvent) + Send + 'static,
    {
        self.relay.subscribe(stream, listener)
    }

    /// Idempotent: returns `false` if the listener was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.relay.unsubscribe(id)
    }

    pub fn listener_count(&self, stream: StreamKind) -> usize {
        self.relay.listener_count(stream)
    }

    /// Wait for the next output chunk, update the connection status from it
    /// and hand it to the listeners of its stream.
    ///
    /// Returns `None` once both streams have closed or the handle was
    /// stopped. Cancel safe: dropping the future loses no output.
    pub async fn dispatch_next(&mut self) -> Option<OutputEvent> {
        let event = self.events.as_mut()?.recv().await;

        let Some(event) = event else {
            self.events = None;
            return None;
        };

        let change = self.monitor.on_output(&event.data, Instant::now());
        self.record(change);

        let delivered = self.relay.dispatch(&event);
        debug!(
            server = %self.launch.identity,
            stream = %event.stream,
            listeners = delivered,
            "output relayed"
        );

        Some(event)
    }

    /// Relay output and check heartbeats until both streams close.
    ///
    /// Same as [`supervise`](crate::engine::supervise) with no shutdown
    /// signal. The handle is stopped on return.
    pub async fn run_until_exit(&mut self) -> ConnectionStatus {
        crate::engine::supervise(self, std::future::pending()).await
    }

    /// Run the heartbeat timeout check against `now`.
    pub fn check_heartbeat(&mut self, now: Instant) -> Option<StatusChange> {
        let change = self.monitor.check_heartbeat(now);
        self.record(change);
        change
    }

    /// Stop relaying: drop every listener and the output channel, and mark
    /// the server disconnected.
    ///
    /// This does not signal the OS process. Its output keeps being read and
    /// discarded until it exits.
    pub fn stop(&mut self) {
        self.relay.clear();
        self.events = None;
        let change = self.monitor.on_stop(Instant::now());
        self.record(change);
    }

    fn record(&mut self, change: Option<StatusChange>) {
        if let Some(change) = change {
            self.transitions.push(change);
            info!(
                server = %self.launch.identity,
                from = %change.from,
                to = %change.to,
                cause = ?change.cause,
                "connection status changed"
            );
        }
    }
}
