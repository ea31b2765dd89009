// src/tasks/patch.rs

use regex::NoExpand;

use crate::tasks::STATUS_RE;
use crate::types::Status;

/// Set the status marker of every line mentioning `title`.
///
/// A line is patched when it contains `title` as a substring and has a
/// status marker; only the first marker on that line is replaced. Every
/// other line, and every other byte of a patched line, is kept as is.
///
/// Matching is by substring, so a title that is part of another task's
/// title patches both lines.
pub fn apply_status_patch(text: &str, title: &str, status: Status) -> String {
    let replacement = format!("[{}]", status.mark());

    text.split('\n')
        .map(|line| {
            if line.contains(title) && STATUS_RE.is_match(line) {
                STATUS_RE.replace(line, NoExpand(&replacement)).into_owned()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of lines [`apply_status_patch`] would touch for `title`.
pub fn count_matching_lines(text: &str, title: &str) -> usize {
    text.split('\n')
        .filter(|line| line.contains(title) && STATUS_RE.is_match(line))
        .count()
}
