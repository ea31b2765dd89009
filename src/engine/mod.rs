// src/engine/mod.rs

//! Connection-status inference for launched servers.
//!
//! Status is derived from output text and a heartbeat timeout; it is not an
//! authoritative process state.
//!
//! The pure state machine lives in [`core`]; the async loop that feeds it
//! output and timer ticks is in [`runtime`].

use std::time::Duration;

use tokio::time::Instant;

use crate::types::ConnectionStatus;

/// A `connected` or `connecting` server with no heartbeat for longer than
/// this is considered gone.
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the heartbeat timeout is checked.
pub const HEARTBEAT_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Output substrings that mark the server as up.
pub const CONNECTED_MARKERS: [&str; 2] = ["Server started", "Listening"];

/// Output substrings that mark the server as down.
pub const FAILURE_MARKERS: [&str; 2] = ["Error", "Failed"];

/// Why the status changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    Launched,
    ConnectedOutput,
    FailureOutput,
    HeartbeatTimeout,
    Stopped,
}

/// A status change reported by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: ConnectionStatus,
    pub to: ConnectionStatus,
    pub cause: TransitionCause,
    pub at: Instant,
}

pub mod core;
pub mod runtime;

pub use self::core::ConnectionMonitor;
pub use runtime::supervise;
