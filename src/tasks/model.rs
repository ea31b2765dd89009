// src/tasks/model.rs

use serde::Serialize;

use crate::types::{Priority, Status};

/// One entry of the task list.
///
/// Only two levels exist: top-level tasks and their direct subtasks.
/// Subtasks always carry their parent's priority and have no subtasks of
/// their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNode {
    pub title: String,
    pub priority: Priority,
    pub status: Status,
    pub subtasks: Vec<TaskNode>,
}

impl TaskNode {
    pub fn new(title: impl Into<String>, priority: Priority, status: Status) -> Self {
        Self {
            title: title.into(),
            priority,
            status,
            subtasks: Vec::new(),
        }
    }

    pub fn with_subtask(mut self, title: impl Into<String>, status: Status) -> Self {
        let sub = TaskNode::new(title, self.priority, status);
        self.subtasks.push(sub);
        self
    }

    /// First whitespace-separated word of the title, used to bucket time in
    /// the daily log.
    pub fn category(&self) -> &str {
        category_of(&self.title)
    }
}

pub fn category_of(title: &str) -> &str {
    title.split_whitespace().next().unwrap_or("")
}
