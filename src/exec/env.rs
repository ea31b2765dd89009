// src/exec/env.rs

use std::collections::BTreeMap;
use std::path::Path;

/// Project identifier exported to every launched server.
pub const PROJECT_ID_VAR: &str = "MCP_PROJECT_ID";
/// Writable data directory exported to every launched server.
pub const WORKSPACE_PATH_VAR: &str = "MCP_WORKSPACE_PATH";
/// Value of [`PROJECT_ID_VAR`] when no project id is given.
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Entries applied on top of the inherited environment: the server's overlay,
/// then the two reserved keys, which always win.
pub fn env_overrides(
    overlay: &BTreeMap<String, String>,
    project_id: Option<&str>,
    workspace: &Path,
) -> BTreeMap<String, String> {
    let mut env = overlay.clone();
    env.insert(
        PROJECT_ID_VAR.to_string(),
        project_id.unwrap_or(DEFAULT_PROJECT_ID).to_string(),
    );
    env.insert(
        WORKSPACE_PATH_VAR.to_string(),
        workspace.to_string_lossy().into_owned(),
    );
    env
}

/// Full child environment: `ambient`, overlaid by `overlay`, overlaid by the
/// reserved keys.
pub fn build_child_env<I, K, V>(
    ambient: I,
    overlay: &BTreeMap<String, String>,
    project_id: Option<&str>,
    workspace: &Path,
) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut env: BTreeMap<String, String> = ambient
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    env.extend(env_overrides(overlay, project_id, workspace));
    env
}

/// The current process environment, skipping entries that are not UTF-8.
pub fn ambient_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
