// src/tasks/parser.rs

use tracing::trace;

use crate::tasks::model::TaskNode;
use crate::tasks::{
    IN_PROGRESS_HEADER, PENDING_HEADER, PRIORITY_RE, STATUS_RE, SUBTASK_MARKER, TOP_LEVEL_MARKER,
};
use crate::types::{Priority, Status};

/// Parse a markdown task list.
///
/// Rules:
/// - `- ` lines are top-level tasks only if they carry both a priority marker
///   and a status marker. Anything else starting with `- ` is prose.
/// - `  - ` lines are subtasks of the most recent top-level task and need only
///   a status marker. They inherit the parent's priority.
/// - A subtask seen before any top-level task is dropped.
/// - Unrecognised lines are skipped. This never fails.
pub fn parse_tasks(text: &str) -> Vec<TaskNode> {
    let mut tasks: Vec<TaskNode> = Vec::new();
    let mut current: Option<TaskNode> = None;
    let mut subtasks: Vec<TaskNode> = Vec::new();

    for line in text.lines() {
        if line.starts_with(IN_PROGRESS_HEADER) || line.starts_with(PENDING_HEADER) {
            continue;
        }

        if line.starts_with(SUBTASK_MARKER) {
            let Some(parent) = current.as_ref() else {
                trace!(line, "subtask before any task; dropped");
                continue;
            };
            if let Some(status) = status_of(line) {
                let title = strip_markers(line, SUBTASK_MARKER);
                subtasks.push(TaskNode::new(title, parent.priority, status));
            }
            continue;
        }

        if line.starts_with(TOP_LEVEL_MARKER) {
            let (Some(priority), Some(status)) = (priority_of(line), status_of(line)) else {
                trace!(line, "list item without priority and status; skipped");
                continue;
            };

            if let Some(mut prev) = current.take() {
                prev.subtasks = std::mem::take(&mut subtasks);
                tasks.push(prev);
            }

            let title = strip_markers(line, TOP_LEVEL_MARKER);
            current = Some(TaskNode::new(title, priority, status));
        }
    }

    if let Some(mut last) = current {
        last.subtasks = subtasks;
        tasks.push(last);
    }

    tasks
}

fn priority_of(line: &str) -> Option<Priority> {
    PRIORITY_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Decoded status of the first status marker on the line, if any.
pub(crate) fn status_of(line: &str) -> Option<Status> {
    STATUS_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| Status::from_mark(m.as_str()))
}

fn strip_markers(line: &str, list_marker: &str) -> String {
    let without_priority = PRIORITY_RE.replace(line, "");
    let without_status = STATUS_RE.replace(&without_priority, "");
    without_status
        .strip_prefix(list_marker)
        .unwrap_or(without_status.as_ref())
        .trim()
        .to_string()
}
