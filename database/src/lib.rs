//! Database crate for the task service
//!
//! This crate provides the MySQL implementation of the TaskRepository trait:
//! schema bootstrap, a bounded connection pool, and parameterized CRUD
//! statements with error mapping onto `TaskError`.
//!
//! # Features
//!
//! - Idempotent creation of the database and the `tasks` table at startup
//! - Bounded pool with FIFO waiting and a configurable acquire timeout
//! - Transactional write-then-read for create and update
//! - Connectivity failures mapped to retryable `TaskError::Connection`
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::{ConnectionSettings, MySqlTaskRepository, PoolSettings};
//! use task_core::{repository::TaskRepository, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = MySqlTaskRepository::connect(
//!         &ConnectionSettings::default(),
//!         &PoolSettings::default(),
//!         RetryPolicy::default(),
//!     )
//!     .await?;
//!
//!     repo.health_check().await?;
//!     println!("Database is healthy!");
//!
//!     repo.close().await;
//!     Ok(())
//! }
//! ```

mod bootstrap;
mod common;
mod mysql;
mod pool;

pub use bootstrap::{SchemaBootstrapper, CREATE_TASKS_TABLE};
pub use mysql::MySqlTaskRepository;
pub use pool::{ConnectionSettings, PoolSettings};

// Re-export commonly used types from task-core for convenience
pub use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, TaskStatus, UpdateTask},
    repository::TaskRepository,
};
