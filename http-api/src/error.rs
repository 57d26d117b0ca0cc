//! Error handling for the HTTP API
//!
//! Maps task errors onto HTTP status codes and the `{success: false, error}`
//! envelope. Storage failures are logged with their root cause and replaced
//! by a fixed message per operation before they reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use task_core::TaskError;
use thiserror::Error;

use crate::envelope::ApiResponse;

/// Message returned for any request that names a task that does not exist
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Message returned when the title is missing or blank
pub const TITLE_REQUIRED: &str = "Title is required";

/// Message returned when the body is not a JSON object of the expected shape
pub const INVALID_BODY: &str = "Invalid request body";

/// Message returned for an `/api` path that matches no route
pub const ROUTE_NOT_FOUND: &str = "Not found";

/// Message returned when the route exists but not for the request method
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Operation a request was performing, used to pick the client-facing 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    DeleteTask,
    TestConnection,
}

impl Operation {
    /// Generic message sent to the client when storage fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListTasks => "Failed to fetch tasks",
            Operation::GetTask => "Failed to fetch task",
            Operation::CreateTask => "Failed to create task",
            Operation::UpdateTask => "Failed to update task",
            Operation::DeleteTask => "Failed to delete task",
            Operation::TestConnection => "Database connection failed",
        }
    }
}

/// HTTP API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Task not found")]
    NotFound,

    #[error("{}: {source}", .operation.failure_message())]
    Storage {
        operation: Operation,
        #[source]
        source: TaskError,
    },
}

impl ApiError {
    /// Classify a repository error in the context of an operation
    pub fn from_task_error(operation: Operation, err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound,
            TaskError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Storage {
                operation,
                source: other,
            },
        }
    }

    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client
    pub fn client_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::NotFound => TASK_NOT_FOUND.to_string(),
            ApiError::Storage { operation, .. } => operation.failure_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { operation, source } = &self {
            tracing::error!(
                operation = ?operation,
                error = %source,
                transient = source.is_transient(),
                "Storage failure"
            );
        }

        let body = ApiResponse::<()>::error(self.client_message());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_classification() {
        let err = ApiError::from_task_error(Operation::GetTask, TaskError::not_found_id(3));
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "Task not found");

        let err = ApiError::from_task_error(
            Operation::CreateTask,
            TaskError::Validation("Title is required".to_string()),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Title is required");
    }

    #[test]
    fn test_storage_errors_hide_root_cause() {
        let err = ApiError::from_task_error(
            Operation::UpdateTask,
            TaskError::Database("Access denied for user 'root'@'10.0.0.5'".to_string()),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Failed to update task");
        assert!(!err.client_message().contains("root"));

        // The full chain is still available for logging
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(Operation::ListTasks.failure_message(), "Failed to fetch tasks");
        assert_eq!(Operation::GetTask.failure_message(), "Failed to fetch task");
        assert_eq!(Operation::CreateTask.failure_message(), "Failed to create task");
        assert_eq!(Operation::DeleteTask.failure_message(), "Failed to delete task");
        assert_eq!(
            Operation::TestConnection.failure_message(),
            "Database connection failed"
        );
    }
}
