// src/exec/launch.rs

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ServerEntry;
use crate::errors::Result;
use crate::exec::backend::ProcessBackend;
use crate::exec::command_line;
use crate::exec::env::{ambient_env, build_child_env, env_overrides};
use crate::exec::handle::ServerProcessHandle;

/// What a caller asks to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Server name; used for logging and as the handle's identity.
    pub identity: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// `None` exports `MCP_PROJECT_ID=default`.
    pub project_id: Option<String>,
}

impl LaunchRequest {
    /// Request for a server as it appears in the config file.
    pub fn from_entry(name: &str, entry: &ServerEntry, project_id: Option<String>) -> Self {
        Self {
            identity: name.to_string(),
            command: entry.command.clone(),
            args: entry.args.clone(),
            env: entry.env_overlay(),
            project_id,
        }
    }
}

/// A request with the command line and environment worked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLaunch {
    pub identity: String,
    /// `command` and `args` joined with spaces, unquoted.
    pub command_line: String,
    /// Overlay plus reserved keys, applied over the inherited environment.
    pub env_overrides: BTreeMap<String, String>,
    /// The resulting child environment, for inspection.
    pub environment: BTreeMap<String, String>,
}

impl PreparedLaunch {
    pub fn new(request: &LaunchRequest, workspace: &Path) -> Self {
        Self::with_ambient(request, workspace, ambient_env())
    }

    /// Like [`PreparedLaunch::new`] with an explicit ambient environment.
    pub fn with_ambient(
        request: &LaunchRequest,
        workspace: &Path,
        ambient: BTreeMap<String, String>,
    ) -> Self {
        let project_id = request.project_id.as_deref();
        Self {
            identity: request.identity.clone(),
            command_line: command_line(&request.command, &request.args),
            env_overrides: env_overrides(&request.env, project_id, workspace),
            environment: build_child_env(ambient, &request.env, project_id, workspace),
        }
    }
}

/// Start a server and return its handle in the `connecting` state.
///
/// Returns once the process exists; output is delivered later through the
/// handle. If the backend cannot create the process the error is returned
/// and no handle (and so no listener) exists.
pub fn launch<B>(backend: &mut B, request: LaunchRequest, workspace: &Path) -> Result<ServerProcessHandle>
where
    B: ProcessBackend + ?Sized,
{
    let prepared = PreparedLaunch::new(&request, workspace);

    let spawned = backend.spawn(&prepared).inspect_err(|e| {
        warn!(server = %prepared.identity, error = %e, "launch failed");
    })?;

    info!(
        server = %prepared.identity,
        pid = ?spawned.pid,
        project_id = request.project_id.as_deref().unwrap_or(crate::exec::env::DEFAULT_PROJECT_ID),
        "server launched"
    );

    Ok(ServerProcessHandle::new(prepared, spawned))
}
