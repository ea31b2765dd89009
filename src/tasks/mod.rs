// src/tasks/mod.rs

//! Markdown task list: parse, format, and in-place status patching.
//!
//! The accepted format is deliberately narrow:
//!
//! ```text
//! ### In Progress
//! - [IN PROGRESS] Wire up relay (P1)
//!   - [x] Stdout reader
//!
//! ### Pending
//! - [ ] Implement cache (P2)
//!   - [ ] Write tests
//! ```
//!
//! - [`parser`] turns text into [`TaskNode`]s, skipping anything it does not
//!   recognise.
//! - [`format`] renders the in-progress and pending tasks back to markdown.
//! - [`patch`] rewrites the status marker of matching lines, leaving the rest
//!   of the text untouched.
//!
//! Nothing here does I/O.

pub mod format;
pub mod model;
pub mod parser;
pub mod patch;

pub use format::format_tasks;
pub use model::TaskNode;
pub use parser::parse_tasks;
pub use patch::{apply_status_patch, count_matching_lines};

use std::sync::LazyLock;

use regex::Regex;

/// `(P1)`..`(P4)`.
pub(crate) static PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((P[1-4])\)").expect("priority regex is valid"));

/// `[ ]`, `[x]` or `[IN PROGRESS]`.
pub(crate) static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([ x]|IN PROGRESS)\]").expect("status regex is valid"));

pub(crate) const TOP_LEVEL_MARKER: &str = "- ";
pub(crate) const SUBTASK_MARKER: &str = "  - ";
pub(crate) const IN_PROGRESS_HEADER: &str = "### In Progress";
pub(crate) const PENDING_HEADER: &str = "### Pending";
