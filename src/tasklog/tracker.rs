// src/tasklog/tracker.rs

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::{McpmanError, Result};
use crate::fs::FileSystem;
use crate::tasklog::entry::LogEntry;
use crate::tasks::{apply_status_patch, count_matching_lines, parse_tasks, TaskNode};
use crate::types::Status;

/// Keeps the task list file and the daily log files in step.
#[derive(Debug)]
pub struct TaskTracker<F: FileSystem> {
    fs: F,
    task_system: PathBuf,
    daily_logs: PathBuf,
}

impl<F: FileSystem> TaskTracker<F> {
    pub fn new(fs: F, task_system: impl Into<PathBuf>, daily_logs: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            task_system: task_system.into(),
            daily_logs: daily_logs.into(),
        }
    }

    pub fn task_system_path(&self) -> &Path {
        &self.task_system
    }

    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.daily_logs.join(LogEntry::new(date).file_name())
    }

    pub fn read_task_system(&self) -> Result<String> {
        Ok(self.fs.read_to_string(&self.task_system)?)
    }

    /// Parse the task list file.
    pub fn load_tasks(&self) -> Result<Vec<TaskNode>> {
        let text = self.read_task_system()?;
        Ok(parse_tasks(&text))
    }

    /// The log for `date`: read back from disk when present, otherwise empty.
    pub fn load_log(&self, date: NaiveDate) -> Result<LogEntry> {
        let path = self.log_path(date);
        if !self.fs.exists(&path) {
            return Ok(LogEntry::new(date));
        }
        let text = self.fs.read_to_string(&path)?;
        Ok(LogEntry::parse(&text, date))
    }

    pub fn save_log(&self, entry: &LogEntry) -> Result<()> {
        let path = self.log_path(entry.date);
        self.fs.write(&path, entry.render().as_bytes())?;
        debug!(path = ?path, "daily log written");
        Ok(())
    }

    /// Change the status of `title` in the task list and record it in the
    /// log for `date`.
    ///
    /// Fails with [`McpmanError::TaskNotFound`] when no line carrying a
    /// status marker mentions `title`; nothing is written in that case.
    pub fn set_status(
        &self,
        title: &str,
        status: Status,
        hours: f64,
        date: NaiveDate,
    ) -> Result<LogEntry> {
        if title.trim().is_empty() {
            return Err(McpmanError::TaskNotFound("<empty title>".to_string()));
        }

        let text = self.read_task_system()?;
        let matched = count_matching_lines(&text, title);
        if matched == 0 {
            return Err(McpmanError::TaskNotFound(title.to_string()));
        }

        let patched = apply_status_patch(&text, title, status);
        self.fs.write(&self.task_system, patched.as_bytes())?;
        info!(task = %title, %status, lines = matched, "task status updated");

        let mut entry = self.load_log(date)?;
        entry.record(title, status, hours);
        self.save_log(&entry)?;

        Ok(entry)
    }
}
