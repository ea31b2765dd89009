// src/tasklog/entry.rs

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::tasks::model::category_of;
use crate::types::Status;

const DATE_HEADER: &str = "# Daily Log: ";
const COMPLETED_HEADER: &str = "## Tasks Completed";
const IN_PROGRESS_HEADER: &str = "## Tasks In Progress";
const TIME_HEADER: &str = "## Time Investment";
const NOTES_HEADER: &str = "## Notes";

static TIME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- (.+): (-?[0-9]+(?:\.[0-9]+)?) hours$").expect("time line regex is valid")
});

/// One day of activity.
///
/// Titles are only ever appended. Recording the same task twice lists it
/// twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub tasks_completed: Vec<String>,
    pub tasks_in_progress: Vec<String>,
    /// Category -> accumulated hours.
    pub time_invested: BTreeMap<String, f64>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Preamble,
    Completed,
    InProgress,
    Time,
    Notes,
}

impl LogEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks_completed: Vec::new(),
            tasks_in_progress: Vec::new(),
            time_invested: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// Record that `title` moved to `status`, spending `hours` on it.
    ///
    /// Completed and in-progress titles are appended to their list; pending
    /// only adds time. Hours go to the category named by the title's first
    /// word.
    pub fn record(&mut self, title: &str, status: Status, hours: f64) {
        match status {
            Status::Completed => self.tasks_completed.push(title.to_string()),
            Status::InProgress => self.tasks_in_progress.push(title.to_string()),
            Status::Pending => {}
        }

        *self
            .time_invested
            .entry(category_of(title).to_string())
            .or_insert(0.0) += hours;
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.date.format("%Y-%m-%d"))
    }

    /// Render the fixed markdown layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{DATE_HEADER}{}", self.date.format("%Y-%m-%d"));

        out.push('\n');
        out.push_str(COMPLETED_HEADER);
        out.push('\n');
        for title in &self.tasks_completed {
            let _ = writeln!(out, "- {title}");
        }

        out.push('\n');
        out.push_str(IN_PROGRESS_HEADER);
        out.push('\n');
        for title in &self.tasks_in_progress {
            let _ = writeln!(out, "- {title}");
        }

        out.push('\n');
        out.push_str(TIME_HEADER);
        out.push('\n');
        for (category, hours) in &self.time_invested {
            let _ = writeln!(out, "- {category}: {hours} hours");
        }

        out.push('\n');
        out.push_str(NOTES_HEADER);
        out.push('\n');
        for note in &self.notes {
            let _ = writeln!(out, "- {note}");
        }

        out
    }

    /// Read a log written by [`LogEntry::render`].
    ///
    /// Lenient like the task parser: unknown lines are ignored. When the date
    /// header is missing or unreadable, `fallback_date` is used.
    pub fn parse(text: &str, fallback_date: NaiveDate) -> Self {
        let mut entry = LogEntry::new(fallback_date);
        let mut section = Section::Preamble;

        for line in text.lines() {
            let line = line.trim_end();

            if let Some(date) = line.strip_prefix(DATE_HEADER) {
                if let Ok(date) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
                    entry.date = date;
                }
                continue;
            }

            section = match line {
                COMPLETED_HEADER => Section::Completed,
                IN_PROGRESS_HEADER => Section::InProgress,
                TIME_HEADER => Section::Time,
                NOTES_HEADER => Section::Notes,
                _ => {
                    entry.absorb_line(section, line);
                    continue;
                }
            };
        }

        entry
    }

    fn absorb_line(&mut self, section: Section, line: &str) {
        match section {
            Section::Preamble => {}
            Section::Completed => {
                if let Some(item) = bullet(line) {
                    self.tasks_completed.push(item.to_string());
                }
            }
            Section::InProgress => {
                if let Some(item) = bullet(line) {
                    self.tasks_in_progress.push(item.to_string());
                }
            }
            Section::Time => {
                if let Some(caps) = TIME_LINE_RE.captures(line) {
                    if let Ok(hours) = caps[2].parse::<f64>() {
                        *self.time_invested.entry(caps[1].to_string()).or_insert(0.0) += hours;
                    }
                }
            }
            Section::Notes => {
                if let Some(note) = bullet(line) {
                    self.notes.push(note.to_string());
                } else if !line.trim().is_empty() {
                    self.notes.push(line.trim().to_string());
                }
            }
        }
    }
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ").map(str::trim).filter(|s| !s.is_empty())
}
