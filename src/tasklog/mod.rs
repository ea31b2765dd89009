// src/tasklog/mod.rs

//! Daily activity log and the task-tracking workflow around it.
//!
//! - [`entry`] holds [`LogEntry`]: one calendar day, rendered to and read
//!   back from a fixed markdown layout.
//! - [`tracker`] applies a status change to the task list file and records
//!   it in that day's log.

pub mod entry;
pub mod tracker;

pub use entry::LogEntry;
pub use tracker::TaskTracker;

use chrono::{NaiveDate, Utc};

/// Today's date in UTC, the key of the daily log file.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
