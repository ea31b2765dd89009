use proptest::prelude::*;

use mcpman::tasks::{apply_status_patch, format_tasks, parse_tasks, TaskNode};
use mcpman::types::{Priority, Status};

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::P1),
        Just(Priority::P2),
        Just(Priority::P3),
        Just(Priority::P4),
    ]
}

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pending),
        Just(Status::InProgress),
        Just(Status::Completed),
    ]
}

// Titles that cannot be mistaken for markers or list syntax.
fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,8}( [A-Za-z0-9]{1,8}){0,3}"
}

fn open_task_strategy() -> impl Strategy<Value = TaskNode> {
    (
        title_strategy(),
        priority_strategy(),
        prop_oneof![Just(Status::Pending), Just(Status::InProgress)],
        proptest::collection::vec((title_strategy(), status_strategy()), 0..4),
    )
        .prop_map(|(title, priority, status, subs)| {
            subs.into_iter()
                .fold(TaskNode::new(title, priority, status), |task, (t, s)| {
                    task.with_subtask(t, s)
                })
        })
}

// Format writes in-progress tasks before pending ones; inputs already in
// that order survive a full round trip.
fn ordered_tasks_strategy() -> impl Strategy<Value = Vec<TaskNode>> {
    proptest::collection::vec(open_task_strategy(), 0..6).prop_map(|mut tasks| {
        tasks.sort_by_key(|t| t.status != Status::InProgress);
        tasks
    })
}

proptest! {
    #[test]
    fn format_then_parse_is_identity(tasks in ordered_tasks_strategy()) {
        let text = format_tasks(&tasks);
        prop_assert_eq!(parse_tasks(&text), tasks);
    }

    #[test]
    fn formatting_is_stable(tasks in ordered_tasks_strategy()) {
        let once = format_tasks(&tasks);
        let twice = format_tasks(&parse_tasks(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn subtasks_share_their_parents_priority(tasks in ordered_tasks_strategy()) {
        for task in parse_tasks(&format_tasks(&tasks)) {
            for sub in &task.subtasks {
                prop_assert_eq!(sub.priority, task.priority);
                prop_assert!(sub.subtasks.is_empty());
            }
        }
    }

    #[test]
    fn patch_touches_only_lines_mentioning_the_title(
        tasks in ordered_tasks_strategy(),
        pick in any::<prop::sample::Index>(),
        status in status_strategy(),
    ) {
        let text = format_tasks(&tasks);
        let lines: Vec<&str> = text.split('\n').collect();
        let title = if tasks.is_empty() {
            "no such title".to_string()
        } else {
            tasks[pick.index(tasks.len())].title.clone()
        };

        let patched = apply_status_patch(&text, &title, status);
        let patched_lines: Vec<&str> = patched.split('\n').collect();

        prop_assert_eq!(lines.len(), patched_lines.len());
        for (before, after) in lines.iter().zip(patched_lines.iter()) {
            // Header lines may mention the title but carry no marker.
            let is_item = before.starts_with("- ") || before.starts_with("  - ");
            if is_item && before.contains(title.as_str()) {
                let expected = format!("[{}]", status.mark());
                prop_assert!(after.contains(&expected));
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn parser_never_panics(text in "(- |  - |### |\\[x\\] |\\[ \\] |\\(P[1-5]\\) |[a-z ]{0,6}|\n){0,40}") {
        let _ = parse_tasks(&text);
    }
}
