//! Task Core Library
//!
//! This crate provides the domain models, validation rules, and trait interfaces
//! for the task service. All other crates depend on the types and interfaces
//! defined here.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`models`] - Domain models (Task, TaskStatus, NewTask, UpdateTask)
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`validation`] - Input validation rules
//! - [`retry`] - Bounded retry for transient storage failures
//!
//! # Example
//!
//! ```rust
//! use task_core::{
//!     models::{NewTask, TaskStatus},
//!     validation::TaskValidator,
//! };
//!
//! let new_task = NewTask::new("Buy milk")
//!     .with_description("2%")
//!     .with_status(TaskStatus::InProgress);
//!
//! // Validate the task before creation
//! TaskValidator::validate_new_task(&new_task).unwrap();
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod retry;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TaskError};
pub use models::{NewTask, Task, TaskStatus, UpdateTask};
pub use repository::TaskRepository;
pub use retry::RetryPolicy;
pub use validation::{TaskValidator, MAX_TITLE_LENGTH};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "task-core");
    }

    #[test]
    fn test_reexports() {
        let task = NewTask::new("Reexport");
        assert!(TaskValidator::validate_new_task(&task).is_ok());
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(RetryPolicy::default().max_attempts, 5);
    }
}
