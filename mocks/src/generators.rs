//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Task titles and descriptions
//! - Random statuses
//! - Property-based testing strategies

use chrono::{Duration, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use task_core::{NewTask, Task, TaskStatus, UpdateTask, MAX_TITLE_LENGTH};

/// Generate a realistic task title that always fits the column
pub fn generate_task_title() -> String {
    let title: String = Sentence(2..7).fake();
    title.chars().take(MAX_TITLE_LENGTH).collect()
}

/// Generate a realistic task description
pub fn generate_task_description() -> String {
    Paragraph(1..4).fake()
}

/// Generate a random task status
pub fn generate_random_status() -> TaskStatus {
    TaskStatus::ALL[rand::thread_rng().gen_range(0..TaskStatus::ALL.len())]
}

/// Generate a random NewTask with realistic data
pub fn generate_new_task() -> NewTask {
    NewTask::new(generate_task_title())
        .with_description(generate_task_description())
        .with_status(generate_random_status())
}

/// Generate a random full replacement update
pub fn generate_update() -> UpdateTask {
    UpdateTask::new(
        generate_task_title(),
        generate_task_description(),
        generate_random_status(),
    )
}

/// Generate a random persisted task with realistic data
pub fn generate_random_task() -> Task {
    let id: u32 = (1..99999).fake();
    let age_minutes: i64 = (0..10_000).fake();
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    Task {
        id: id as i32,
        title: generate_task_title(),
        description: generate_task_description(),
        status: generate_random_status(),
        created_at,
        updated_at: created_at,
    }
}

/// Proptest strategy for statuses
pub fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

/// Proptest strategy for titles the validator accepts
pub fn valid_title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,!?'-]{0,120}"
}

/// Proptest strategy for valid NewTask values
pub fn new_task_strategy() -> impl Strategy<Value = NewTask> {
    (
        valid_title_strategy(),
        "[A-Za-z0-9 .,]{0,200}",
        task_status_strategy(),
    )
        .prop_map(|(title, description, status)| {
            NewTask::new(title)
                .with_description(description)
                .with_status(status)
        })
}

/// Proptest strategy for valid UpdateTask values
pub fn update_task_strategy() -> impl Strategy<Value = UpdateTask> {
    new_task_strategy().prop_map(UpdateTask::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_core::TaskValidator;

    #[test]
    fn test_generated_tasks_are_valid() {
        for _ in 0..50 {
            let task = generate_new_task();
            assert!(TaskValidator::validate_new_task(&task).is_ok(), "{task:?}");
        }
    }

    proptest! {
        #[test]
        fn strategy_titles_validate(task in new_task_strategy()) {
            prop_assert!(TaskValidator::validate_new_task(&task).is_ok());
        }
    }
}
