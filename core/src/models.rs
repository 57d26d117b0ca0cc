use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TaskError;

/// Core task representation in the task service.
///
/// A task is a single to-do item persisted as one row of the `tasks` table.
/// The `id` is assigned by the database on insertion and never changes;
/// `created_at` is fixed at insertion while `updated_at` moves forward on
/// every successful update.
///
/// # Examples
///
/// ```rust
/// use task_core::models::{Task, TaskStatus};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let task = Task {
///     id: 42,
///     title: "Buy milk".to_string(),
///     description: "2%".to_string(),
///     status: TaskStatus::Pending,
///     created_at: now,
///     updated_at: now,
/// };
///
/// assert!(!task.is_completed());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Auto-increment primary key
    pub id: i32,
    /// Short, non-empty task title
    pub title: String,
    /// Free-form details, empty when not provided
    pub description: String,
    /// Current workflow status
    pub status: TaskStatus,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Task workflow status.
///
/// Stored and transmitted as the snake_case strings `pending`,
/// `in_progress` and `completed`. Any status may be replaced by any other
/// through an update; there is no transition graph.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

impl TaskStatus {
    /// All statuses in declaration order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(TaskError::invalid_status(other)),
        }
    }
}

/// Data transfer object for creating new tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    /// Task title, must not be empty
    pub title: String,
    /// Optional details
    #[serde(default)]
    pub description: String,
    /// Initial status
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// Create a NewTask with an empty description and `pending` status
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pending,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the initial status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Data transfer object for updating existing tasks.
///
/// Updates replace all three mutable fields at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTask {
    /// Replacement title, must not be empty
    pub title: String,
    /// Replacement description
    #[serde(default)]
    pub description: String,
    /// Replacement status
    #[serde(default)]
    pub status: TaskStatus,
}

impl UpdateTask {
    /// Create a full replacement for an existing task's mutable fields
    pub fn new(title: impl Into<String>, description: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }
}

impl From<NewTask> for UpdateTask {
    fn from(task: NewTask) -> Self {
        Self {
            title: task.title,
            description: task.description,
            status: task.status,
        }
    }
}

impl Task {
    /// Check if the task has been completed
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Apply a full replacement update, stamping `updated_at`
    pub fn apply_update(&mut self, update: UpdateTask, updated_at: DateTime<Utc>) {
        self.title = update.title;
        self.description = update.description;
        self.status = update.status;
        self.updated_at = updated_at;
    }
}
