// tests/tasks_format.rs

mod common;
use crate::common::builders::TaskListBuilder;

use mcpman::tasks::{format_tasks, parse_tasks};
use mcpman::types::{ConnectionStatus, Priority, Status};

#[test]
fn formats_in_progress_then_pending_sections() {
    let tasks = TaskListBuilder::new()
        .task("Write parser", Priority::P2, Status::Pending)
        .subtask("Tests", Status::Completed)
        .task("Relay output", Priority::P1, Status::InProgress)
        .subtask("stderr", Status::Pending)
        .build();

    let out = format_tasks(&tasks);

    let expected = "\
### In Progress
- [IN PROGRESS] Relay output (P1)
  - [ ] stderr

### Pending
- [ ] Write parser (P2)
  - [x] Tests
";
    assert_eq!(out, expected);
}

#[test]
fn empty_task_list_still_has_both_headers() {
    assert_eq!(format_tasks(&[]), "### In Progress\n\n### Pending\n");
}

#[test]
fn completed_tasks_are_not_emitted() {
    let tasks = TaskListBuilder::new()
        .task("Finished thing", Priority::P1, Status::Completed)
        .subtask("Finished sub", Status::Completed)
        .task("Open thing", Priority::P3, Status::Pending)
        .build();

    let out = format_tasks(&tasks);

    assert!(!out.contains("Finished thing"));
    assert!(!out.contains("Finished sub"));
    assert!(out.contains("- [ ] Open thing (P3)"));
}

#[test]
fn subtasks_carry_no_priority_annotation() {
    let tasks = TaskListBuilder::new()
        .task("Parent", Priority::P4, Status::InProgress)
        .subtask("Child", Status::InProgress)
        .build();

    let out = format_tasks(&tasks);

    assert!(out.contains("  - [IN PROGRESS] Child\n"));
    assert!(!out.contains("Child (P4)"));
}

#[test]
fn status_mark_encoding_round_trips() {
    for status in [Status::Pending, Status::InProgress, Status::Completed] {
        assert_eq!(Status::from_mark(status.mark()), status);
    }
}

#[test]
fn defaults_are_pending_and_disconnected() {
    assert_eq!(Status::default(), Status::Pending);
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}

#[test]
fn relative_order_within_a_section_is_kept() {
    let text = "\
- [ ] b (P1)
- [IN PROGRESS] x (P2)
- [ ] a (P3)
- [IN PROGRESS] y (P4)
";
    let reparsed = parse_tasks(&format_tasks(&parse_tasks(text)));
    let titles: Vec<_> = reparsed.iter().map(|t| t.title.as_str()).collect();

    assert_eq!(titles, vec!["x", "y", "b", "a"]);
}
