// src/exec/mod.rs

//! Process launch and output relay.
//!
//! - [`env`] builds the child environment (ambient + overlay + reserved keys).
//! - [`launch`] turns a [`LaunchRequest`] into a running
//!   [`ServerProcessHandle`].
//! - [`backend`] provides the `ProcessBackend` trait and the tokio-based
//!   `RealProcessBackend`; tests swap in a fake that replays output.
//! - [`relay`] is the per-handle listener registry that output chunks are
//!   fanned out to.
//! - [`handle`] owns one launched server: its listeners, its event channel
//!   and its connection status.

pub mod backend;
pub mod env;
pub mod handle;
pub mod launch;
pub mod relay;

pub use backend::{ProcessBackend, RealProcessBackend, SpawnedProcess};
pub use handle::ServerProcessHandle;
pub use launch::{launch, LaunchRequest, PreparedLaunch};
pub use relay::{ListenerId, OutputEvent, OutputRelay};

/// Join `command` and `args` with single spaces.
///
/// No quoting or escaping is done: an argument containing spaces or shell
/// metacharacters is passed to the shell as written. Callers that need
/// quoting must include it in the argument itself.
pub fn command_line(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
