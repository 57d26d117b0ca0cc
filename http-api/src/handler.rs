//! Task resource handler
//!
//! Bridges HTTP requests to the TaskRepository: validates the payload,
//! calls the repository once, and classifies the outcome. Validation always
//! completes before any repository call.

use serde::Deserialize;
use std::sync::Arc;
use task_core::{
    NewTask, Task, TaskError, TaskRepository, TaskStatus, TaskValidator, UpdateTask,
};

use crate::error::{ApiError, Operation, TITLE_REQUIRED};

/// Request body accepted by create and update
///
/// Every field is optional at the JSON level so that a missing title can be
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Validated field values extracted from a payload
struct ValidatedFields {
    title: String,
    description: String,
    status: TaskStatus,
}

impl TaskPayload {
    fn validate(self) -> Result<ValidatedFields, ApiError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ApiError::BadRequest(TITLE_REQUIRED.to_string())),
        };
        TaskValidator::validate_title(&title).map_err(validation_message)?;

        let status =
            TaskValidator::parse_status(self.status.as_deref()).map_err(validation_message)?;

        Ok(ValidatedFields {
            title,
            description: self.description.unwrap_or_default(),
            status,
        })
    }

    /// Validate into a NewTask, defaulting description and status
    pub fn into_new_task(self) -> Result<NewTask, ApiError> {
        let fields = self.validate()?;
        Ok(NewTask::new(fields.title)
            .with_description(fields.description)
            .with_status(fields.status))
    }

    /// Validate into a full replacement UpdateTask
    pub fn into_update(self) -> Result<UpdateTask, ApiError> {
        let fields = self.validate()?;
        Ok(UpdateTask::new(fields.title, fields.description, fields.status))
    }
}

fn validation_message(err: TaskError) -> ApiError {
    match err {
        TaskError::Validation(msg) => ApiError::BadRequest(msg),
        other => ApiError::BadRequest(other.to_string()),
    }
}

/// Parse a path segment into a task id; non-positive or non-numeric ids are not found
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    TaskValidator::parse_task_id(raw).map_err(|_| ApiError::NotFound)
}

/// Task resource handler that bridges HTTP routes with a TaskRepository
pub struct TaskResourceHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for TaskResourceHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R> TaskResourceHandler<R> {
    /// Create new task resource handler
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        self.repository.clone()
    }
}

impl<R: TaskRepository> TaskResourceHandler<R> {
    /// List all tasks, newest first
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.repository
            .list()
            .await
            .map_err(|e| ApiError::from_task_error(Operation::ListTasks, e))
    }

    /// Fetch one task by its raw path id
    pub async fn get_task(&self, raw_id: &str) -> Result<Task, ApiError> {
        let id = parse_id(raw_id)?;
        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ApiError::from_task_error(Operation::GetTask, e))?
            .ok_or(ApiError::NotFound)
    }

    /// Validate a payload and create a task
    pub async fn create_task(&self, payload: TaskPayload) -> Result<Task, ApiError> {
        let new_task = payload.into_new_task()?;
        self.repository
            .create(new_task)
            .await
            .map_err(|e| ApiError::from_task_error(Operation::CreateTask, e))
    }

    /// Validate a payload and replace an existing task
    pub async fn update_task(&self, raw_id: &str, payload: TaskPayload) -> Result<Task, ApiError> {
        let id = parse_id(raw_id)?;
        let update = payload.into_update()?;
        self.repository
            .update(id, update)
            .await
            .map_err(|e| ApiError::from_task_error(Operation::UpdateTask, e))
    }

    /// Delete a task by its raw path id
    pub async fn delete_task(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = parse_id(raw_id)?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| ApiError::from_task_error(Operation::DeleteTask, e))
    }

    /// Round-trip to the database
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        self.repository
            .health_check()
            .await
            .map_err(|e| ApiError::from_task_error(Operation::TestConnection, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocks::MockTaskRepository;

    fn payload(title: Option<&str>, description: Option<&str>, status: Option<&str>) -> TaskPayload {
        TaskPayload {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_payload_defaults() {
        let task = payload(Some("Buy milk"), None, None).into_new_task().unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Pending);

        let update = payload(Some("Buy milk"), None, None).into_update().unwrap();
        assert_eq!(update.status, TaskStatus::Pending);
    }

    #[test]
    fn test_payload_rejections() {
        for title in [None, Some(""), Some("   ")] {
            let err = payload(title, None, None).into_new_task().unwrap_err();
            assert_eq!(err.client_message(), "Title is required");
        }

        let long = "x".repeat(256);
        let err = payload(Some(&long), None, None).into_new_task().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = payload(Some("ok"), None, Some("invalid_status"))
            .into_update()
            .unwrap_err();
        assert!(err.client_message().starts_with("Invalid status: 'invalid_status'"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("0"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_repository() {
        let repo = Arc::new(MockTaskRepository::new());
        let handler = TaskResourceHandler::new(repo.clone());

        assert!(handler.create_task(payload(Some(" "), None, None)).await.is_err());
        assert!(handler
            .update_task("1", payload(Some("ok"), None, Some("done")))
            .await
            .is_err());
        assert!(handler.delete_task("-1").await.is_err());

        assert!(repo.call_history().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_classified_per_operation() {
        let repo = Arc::new(MockTaskRepository::new());
        let handler = TaskResourceHandler::new(repo.clone());

        repo.inject_error(TaskError::Connection("refused".to_string()));
        let err = handler.list_tasks().await.unwrap_err();
        assert_eq!(err.client_message(), "Failed to fetch tasks");

        repo.inject_error(TaskError::Database("deadlock".to_string()));
        let err = handler.test_connection().await.unwrap_err();
        assert_eq!(err.client_message(), "Database connection failed");
    }
}
