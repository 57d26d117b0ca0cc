//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Task equality with clear error messages
//! - Ordering of list results
//! - Error classification

use task_core::{NewTask, Task, TaskError, UpdateTask};

/// Assert tasks are equal ignoring timestamps
pub fn assert_task_equals(actual: &Task, expected: &Task) {
    assert_eq!(actual.id, expected.id, "Task IDs don't match");
    assert_eq!(actual.title, expected.title, "Task titles don't match");
    assert_eq!(
        actual.description, expected.description,
        "Task descriptions don't match"
    );
    assert_eq!(actual.status, expected.status, "Task statuses don't match");
}

/// Assert a stored task carries exactly the fields it was created from
pub fn assert_task_matches_new(task: &Task, new_task: &NewTask) {
    assert_eq!(task.title, new_task.title, "Title was not preserved");
    assert_eq!(
        task.description, new_task.description,
        "Description was not preserved"
    );
    assert_eq!(task.status, new_task.status, "Status was not preserved");
}

/// Assert a stored task reflects a full replacement update
pub fn assert_task_matches_update(task: &Task, update: &UpdateTask) {
    assert_eq!(task.title, update.title, "Title was not replaced");
    assert_eq!(task.description, update.description, "Description was not replaced");
    assert_eq!(task.status, update.status, "Status was not replaced");
}

/// Assert tasks are ordered newest first by `created_at`, ties broken by id
pub fn assert_newest_first(tasks: &[Task]) {
    for pair in tasks.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.created_at > b.created_at || (a.created_at == b.created_at && a.id > b.id),
            "Tasks {} ({}) and {} ({}) are not newest first",
            a.id,
            a.created_at,
            b.id,
            b.created_at
        );
    }
}

/// Assert the result is a not-found error
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, TaskError>) {
    match result {
        Err(TaskError::NotFound(_)) => {}
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

/// Assert the result is a validation error
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, TaskError>) {
    match result {
        Err(TaskError::Validation(_)) => {}
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::create_test_tasks;

    #[test]
    fn test_assert_newest_first_accepts_sorted() {
        let mut tasks = create_test_tasks(4);
        tasks.reverse();
        assert_newest_first(&tasks);
    }

    #[test]
    #[should_panic(expected = "are not newest first")]
    fn test_assert_newest_first_rejects_oldest_first() {
        assert_newest_first(&create_test_tasks(3));
    }

    #[test]
    fn test_error_assertions() {
        assert_not_found::<()>(Err(TaskError::not_found_id(1)));
        assert_validation_error::<()>(Err(TaskError::empty_field("title")));
    }
}
