//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Task construction with sensible defaults
//! - NewTask and UpdateTask variants

use chrono::{DateTime, Utc};
use task_core::{NewTask, Task, TaskStatus, UpdateTask};

/// Builder for constructing Task instances in tests
pub struct TaskBuilder {
    task: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            task: Task {
                id: 1,
                title: "Test Task".to_string(),
                description: "A test task".to_string(),
                status: TaskStatus::Pending,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Set task ID
    pub fn with_id(mut self, id: i32) -> Self {
        self.task.id = id;
        self
    }

    /// Set task title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    /// Set task description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = description.into();
        self
    }

    /// Set task status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    /// Set both timestamps to the same instant
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.task.created_at = created_at;
        self.task.updated_at = created_at;
        self
    }

    /// Set the last modification timestamp
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.task.updated_at = updated_at;
        self
    }

    /// Build the final Task
    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for NewTask instances
pub struct NewTaskBuilder {
    task: NewTask,
}

impl Default for NewTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTaskBuilder {
    pub fn new() -> Self {
        Self {
            task: NewTask::new("New Task").with_description("A new test task"),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn build(self) -> NewTask {
        self.task
    }
}

/// Builder for UpdateTask instances
///
/// Starts from an existing task so a test can change one field and keep
/// the rest, since updates replace every mutable field.
pub struct UpdateTaskBuilder {
    update: UpdateTask,
}

impl Default for UpdateTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateTaskBuilder {
    pub fn new() -> Self {
        Self {
            update: UpdateTask::new("Updated Task", "", TaskStatus::Pending),
        }
    }

    /// Start from the current values of a task
    pub fn from_task(task: &Task) -> Self {
        Self {
            update: UpdateTask::new(task.title.clone(), task.description.clone(), task.status),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.update.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.update.status = status;
        self
    }

    pub fn build(self) -> UpdateTask {
        self.update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = TaskBuilder::new()
            .with_id(9)
            .with_title("Built")
            .with_status(TaskStatus::Completed)
            .build();

        assert_eq!(task.id, 9);
        assert_eq!(task.title, "Built");
        assert!(task.is_completed());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_update_builder_from_task_keeps_other_fields() {
        let task = TaskBuilder::new()
            .with_description("keep me")
            .with_status(TaskStatus::InProgress)
            .build();

        let update = UpdateTaskBuilder::from_task(&task)
            .with_title("Renamed")
            .build();

        assert_eq!(update.title, "Renamed");
        assert_eq!(update.description, "keep me");
        assert_eq!(update.status, TaskStatus::InProgress);
    }
}
