//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - Standard tasks in each status
//! - Edge case titles and descriptions
//! - Bulk task generators with ordered timestamps

use chrono::{Duration, Utc};
use task_core::{NewTask, Task, TaskStatus, UpdateTask, MAX_TITLE_LENGTH};

/// Create a basic test task with sensible defaults
pub fn create_test_task() -> Task {
    let now = Utc::now();
    Task {
        id: 1,
        title: "Test Task".to_string(),
        description: "A standard test task with default values".to_string(),
        status: TaskStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

/// Create task with specific status
pub fn create_test_task_with_status(status: TaskStatus) -> Task {
    let mut task = create_test_task();
    task.status = status;
    task
}

/// Create multiple unique tasks, each created one second after the previous
pub fn create_test_tasks(count: usize) -> Vec<Task> {
    let base = Utc::now() - Duration::seconds(count as i64);
    (1..=count)
        .map(|i| {
            let created_at = base + Duration::seconds(i as i64);
            Task {
                id: i as i32,
                title: format!("Test Task {i}"),
                description: format!("Test task number {i} for bulk testing"),
                status: TaskStatus::ALL[i % TaskStatus::ALL.len()],
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

/// Create one task in each possible status
pub fn create_tasks_in_all_statuses() -> Vec<Task> {
    TaskStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let mut task = create_test_task_with_status(*status);
            task.id = i as i32 + 1;
            task.title = format!("{status} task");
            task
        })
        .collect()
}

/// Create a standard NewTask for testing
pub fn create_new_task() -> NewTask {
    NewTask::new("New Test Task").with_description("A new task for testing creation")
}

/// Create a NewTask with the given title and defaults for everything else
pub fn create_new_task_titled(title: &str) -> NewTask {
    NewTask::new(title)
}

/// Create a full replacement update
pub fn create_update_task() -> UpdateTask {
    UpdateTask::new(
        "Updated Task Title",
        "Updated description",
        TaskStatus::InProgress,
    )
}

/// Title of exactly the maximum accepted length
pub fn max_length_title() -> String {
    "t".repeat(MAX_TITLE_LENGTH)
}

/// Title one character over the maximum accepted length
pub fn overlong_title() -> String {
    "t".repeat(MAX_TITLE_LENGTH + 1)
}

/// Titles that must always be rejected
pub fn invalid_titles() -> Vec<String> {
    vec![
        String::new(),
        " ".to_string(),
        "\t\n  ".to_string(),
        overlong_title(),
    ]
}

/// Titles that must be stored and returned verbatim
pub fn unusual_valid_titles() -> Vec<String> {
    vec![
        "x".to_string(),
        "  padded  ".to_string(),
        "Robert'); DROP TABLE tasks;--".to_string(),
        "Emoji 🚀 and accents: café".to_string(),
        max_length_title(),
    ]
}
