use thiserror::Error;

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error types for the task service.
///
/// These errors cover every failure mode of a task operation, from input
/// validation to storage failures. Each error maps to the HTTP status code
/// the API reports for it.
///
/// # Examples
///
/// ```rust
/// use task_core::error::TaskError;
///
/// let not_found = TaskError::not_found_id(42);
/// let empty_title = TaskError::empty_field("title");
///
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
/// assert_eq!(empty_title.status_code(), 400);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task not found by the given identifier
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Validation error with details
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Database unreachable or connection pool exhausted
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TaskError {
    /// Create a not found error for a task ID
    pub fn not_found_id(id: i32) -> Self {
        Self::NotFound(format!("Task with ID {id} not found"))
    }

    /// Create a validation error for empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a validation error for an unknown status value
    pub fn invalid_status(value: &str) -> Self {
        Self::Validation(format!(
            "Invalid status: '{value}'. Must be one of: pending, in_progress, completed"
        ))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }

    /// Check if this error indicates a storage problem
    pub fn is_database(&self) -> bool {
        matches!(self, TaskError::Database(_) | TaskError::Connection(_))
    }

    /// Check if retrying the operation may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, TaskError::Connection(_))
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TaskError::NotFound(_) => 404,
            TaskError::Validation(_) => 400,
            TaskError::Database(_) => 500,
            TaskError::Connection(_) => 500,
            TaskError::Configuration(_) => 500,
        }
    }
}
