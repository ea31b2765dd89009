// tests/tasks_parser.rs

use mcpman::tasks::{parse_tasks, TaskNode};
use mcpman::types::{Priority, Status};

#[test]
fn task_with_completed_subtask_parses_into_one_node() {
    let text = "- [ ] Implement cache (P2)\n  - [x] Write tests\n";

    let tasks = parse_tasks(text);

    let expected = vec![TaskNode {
        title: "Implement cache".to_string(),
        priority: Priority::P2,
        status: Status::Pending,
        subtasks: vec![TaskNode {
            title: "Write tests".to_string(),
            priority: Priority::P2,
            status: Status::Completed,
            subtasks: vec![],
        }],
    }];
    assert_eq!(tasks, expected);
}

#[test]
fn status_markers_decode() {
    let text = "\
- [ ] Alpha (P1)
- [x] Beta (P3)
- [IN PROGRESS] Gamma (P4)
";
    let tasks = parse_tasks(text);
    let statuses: Vec<_> = tasks.iter().map(|t| (t.title.as_str(), t.status)).collect();

    assert_eq!(
        statuses,
        vec![
            ("Alpha", Status::Pending),
            ("Beta", Status::Completed),
            ("Gamma", Status::InProgress),
        ]
    );
}

#[test]
fn section_headers_and_prose_are_skipped() {
    let text = "\
# Task System

### In Progress
- [IN PROGRESS] Relay output (P1)

### Pending
- Notes about the pending work
- [ ] Missing priority
- Missing status (P2)
- [ ] Real task (P2)
";
    let tasks = parse_tasks(text);
    let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();

    assert_eq!(titles, vec!["Relay output", "Real task"]);
}

#[test]
fn subtasks_attach_to_the_most_recent_task_and_inherit_priority() {
    let text = "\
- [IN PROGRESS] First (P1)
  - [ ] one
  - [IN PROGRESS] two
- [ ] Second (P4)
  - [x] three
";
    let tasks = parse_tasks(text);
    assert_eq!(tasks.len(), 2);

    assert_eq!(tasks[0].subtasks.len(), 2);
    assert_eq!(tasks[0].subtasks[0].title, "one");
    assert_eq!(tasks[0].subtasks[1].status, Status::InProgress);
    assert!(tasks[0].subtasks.iter().all(|s| s.priority == Priority::P1));

    assert_eq!(tasks[1].subtasks.len(), 1);
    assert_eq!(tasks[1].subtasks[0].title, "three");
    assert_eq!(tasks[1].subtasks[0].priority, Priority::P4);
}

#[test]
fn subtask_priority_marker_is_stripped_but_ignored() {
    let text = "- [ ] Parent (P3)\n  - [ ] Child (P1)\n";
    let tasks = parse_tasks(text);

    let child = &tasks[0].subtasks[0];
    assert_eq!(child.title, "Child");
    assert_eq!(child.priority, Priority::P3);
}

#[test]
fn subtask_before_any_task_is_dropped() {
    let text = "  - [x] orphan\n- [ ] Owner (P2)\n  - [ ] kept\n";
    let tasks = parse_tasks(text);

    assert_eq!(tasks.len(), 1);
    let subs: Vec<_> = tasks[0].subtasks.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(subs, vec!["kept"]);
}

#[test]
fn subtask_without_status_marker_is_dropped() {
    let text = "- [ ] Owner (P2)\n  - just a note\n  - [ ] real\n";
    let tasks = parse_tasks(text);

    assert_eq!(tasks[0].subtasks.len(), 1);
    assert_eq!(tasks[0].subtasks[0].title, "real");
}

#[test]
fn markers_anywhere_on_the_line_are_stripped_from_the_title() {
    let text = "- (P2) Ship it [x]   \n";
    let tasks = parse_tasks(text);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Ship it");
    assert_eq!(tasks[0].priority, Priority::P2);
    assert_eq!(tasks[0].status, Status::Completed);
}

#[test]
fn unsupported_bracket_content_is_not_a_status_marker() {
    let text = "- [done] Something (P1)\n";
    assert!(parse_tasks(text).is_empty());
}

#[test]
fn crlf_input_parses_like_lf() {
    let text = "- [ ] Windows (P1)\r\n  - [x] line endings\r\n";
    let tasks = parse_tasks(text);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Windows");
    assert_eq!(tasks[0].subtasks[0].title, "line endings");
}

#[test]
fn empty_input_yields_no_tasks() {
    assert!(parse_tasks("").is_empty());
    assert!(parse_tasks("### In Progress\n\n### Pending\n").is_empty());
}

#[test]
fn category_is_first_word_of_title() {
    let tasks = parse_tasks("- [ ] Backend cache layer (P2)\n");
    assert_eq!(tasks[0].category(), "Backend");
}
