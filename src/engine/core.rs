// src/engine/core.rs

//! Pure connection-status state machine.
//!
//! `ConnectionMonitor` has no channels, no timers and does no IO. Callers pass
//! the current instant in, which keeps it deterministic under test.
//!
//! ```text
//! disconnected --launch--> connecting
//! connecting/connected --"Server started"|"Listening"--> connected (heartbeat = now)
//! any --"Error"|"Failed"--> disconnected
//! connecting/connected --no heartbeat for > 10s--> disconnected
//! any --stop--> disconnected
//! ```

use tokio::time::Instant;

use crate::engine::{
    StatusChange, TransitionCause, CONNECTED_MARKERS, FAILURE_MARKERS, HEARTBEAT_TIMEOUT,
};
use crate::types::ConnectionStatus;

#[derive(Debug, Clone, Default)]
pub struct ConnectionMonitor {
    status: ConnectionStatus,
    last_heartbeat: Option<Instant>,
    launched_at: Option<Instant>,
}

impl ConnectionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn last_heartbeat(&self) -> Option<Instant> {
        self.last_heartbeat
    }

    pub fn on_launch(&mut self, now: Instant) -> Option<StatusChange> {
        self.launched_at = Some(now);
        self.last_heartbeat = None;
        self.transition(ConnectionStatus::Connecting, TransitionCause::Launched, now)
    }

    /// Feed one output chunk. Connected markers are checked before failure
    /// markers, so a chunk carrying both counts as a heartbeat.
    pub fn on_output(&mut self, chunk: &str, now: Instant) -> Option<StatusChange> {
        if CONNECTED_MARKERS.iter().any(|m| chunk.contains(m)) {
            self.last_heartbeat = Some(now);
            return self.transition(ConnectionStatus::Connected, TransitionCause::ConnectedOutput, now);
        }

        if FAILURE_MARKERS.iter().any(|m| chunk.contains(m)) {
            return self.transition(ConnectionStatus::Disconnected, TransitionCause::FailureOutput, now);
        }

        None
    }

    /// Timer check. While `connecting` with no heartbeat yet, the launch
    /// instant stands in for the heartbeat.
    pub fn check_heartbeat(&mut self, now: Instant) -> Option<StatusChange> {
        if self.status == ConnectionStatus::Disconnected {
            return None;
        }

        let reference = self.last_heartbeat.or(self.launched_at)?;
        if now.saturating_duration_since(reference) > HEARTBEAT_TIMEOUT {
            return self.transition(
                ConnectionStatus::Disconnected,
                TransitionCause::HeartbeatTimeout,
                now,
            );
        }

        None
    }

    pub fn on_stop(&mut self, now: Instant) -> Option<StatusChange> {
        self.transition(ConnectionStatus::Disconnected, TransitionCause::Stopped, now)
    }

    fn transition(
        &mut self,
        to: ConnectionStatus,
        cause: TransitionCause,
        at: Instant,
    ) -> Option<StatusChange> {
        let from = self.status;
        if from == to {
            return None;
        }
        self.status = to;
        Some(StatusChange { from, to, cause, at })
    }
}
