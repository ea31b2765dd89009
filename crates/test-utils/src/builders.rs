#![allow(dead_code)]

use mcpman::config::{McpConfig, ServerEntry};
use mcpman::tasks::TaskNode;
use mcpman::types::{Priority, Status};

/// Builder for `McpConfig` to simplify test setup.
pub struct McpConfigBuilder {
    config: McpConfig,
}

impl McpConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: McpConfig::default(),
        }
    }

    pub fn with_server(mut self, name: &str, entry: ServerEntry) -> Self {
        self.config.upsert_server(name, entry);
        self
    }

    pub fn build(self) -> McpConfig {
        self.config
    }
}

impl Default for McpConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ServerEntry`.
pub struct ServerEntryBuilder {
    entry: ServerEntry,
}

impl ServerEntryBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            entry: ServerEntry::new(command, vec![]),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.entry.args.push(arg.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.entry
            .env
            .get_or_insert_with(Default::default)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ServerEntry {
        self.entry
    }
}

/// Builder for a list of `TaskNode`s.
pub struct TaskListBuilder {
    tasks: Vec<TaskNode>,
}

impl TaskListBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn task(mut self, title: &str, priority: Priority, status: Status) -> Self {
        self.tasks.push(TaskNode::new(title, priority, status));
        self
    }

    /// Add a subtask to the most recently added task.
    pub fn subtask(mut self, title: &str, status: Status) -> Self {
        let parent = self
            .tasks
            .last_mut()
            .expect("subtask() called before any task()");
        let sub = TaskNode::new(title, parent.priority, status);
        parent.subtasks.push(sub);
        self
    }

    pub fn build(self) -> Vec<TaskNode> {
        self.tasks
    }
}

impl Default for TaskListBuilder {
    fn default() -> Self {
        Self::new()
    }
}
