// src/tasks/format.rs

use std::fmt::Write;

use crate::tasks::model::TaskNode;
use crate::tasks::{IN_PROGRESS_HEADER, PENDING_HEADER, SUBTASK_MARKER, TOP_LEVEL_MARKER};
use crate::types::Status;

/// Render tasks as markdown: an in-progress section, then a pending section.
///
/// Completed top-level tasks are not written to either section. Subtasks are
/// written with their own status mark, whatever it is, and without a
/// priority annotation.
pub fn format_tasks(tasks: &[TaskNode]) -> String {
    let mut out = String::new();

    out.push_str(IN_PROGRESS_HEADER);
    out.push('\n');
    for task in tasks.iter().filter(|t| t.status == Status::InProgress) {
        write_task(&mut out, task);
    }

    out.push('\n');
    out.push_str(PENDING_HEADER);
    out.push('\n');
    for task in tasks.iter().filter(|t| t.status == Status::Pending) {
        write_task(&mut out, task);
    }

    out
}

fn write_task(out: &mut String, task: &TaskNode) {
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{TOP_LEVEL_MARKER}[{}] {} ({})",
        task.status.mark(),
        task.title,
        task.priority
    );
    for sub in &task.subtasks {
        let _ = writeln!(out, "{SUBTASK_MARKER}[{}] {}", sub.status.mark(), sub.title);
    }
}
