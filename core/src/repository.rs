use async_trait::async_trait;
use crate::{
    error::Result,
    models::{NewTask, Task, UpdateTask},
};

/// Repository trait for task persistence and retrieval operations
///
/// This trait defines the interface for all task data operations.
/// Implementations must be thread-safe and support concurrent access.
/// Every operation maps onto a parameterized statement; values are never
/// interpolated into SQL text.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List every task, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<Task>)` - All tasks ordered by `created_at` descending (may be empty)
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by its numeric ID
    ///
    /// # Arguments
    /// * `id` - The task ID to find
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The task if found
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn get_by_id(&self, id: i32) -> Result<Option<Task>>;

    /// Create a new task
    ///
    /// # Arguments
    /// * `task` - The new task data to create
    ///
    /// # Returns
    /// * `Ok(Task)` - The persisted task with assigned ID and timestamps
    /// * `Err(TaskError::Validation)` - If the title is empty (no SQL is issued)
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Replace title, description and status of an existing task
    ///
    /// # Arguments
    /// * `id` - The task ID to update
    /// * `update` - The replacement values
    ///
    /// # Returns
    /// * `Ok(Task)` - The updated task with a refreshed `updated_at`
    /// * `Err(TaskError::NotFound)` - If the task doesn't exist
    /// * `Err(TaskError::Validation)` - If the title is empty (no SQL is issued)
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn update(&self, id: i32, update: UpdateTask) -> Result<Task>;

    /// Physically delete a task
    ///
    /// # Arguments
    /// * `id` - The task ID to delete
    ///
    /// # Returns
    /// * `Ok(())` - The row was removed
    /// * `Err(TaskError::NotFound)` - If no row matched
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn delete(&self, id: i32) -> Result<()>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TaskError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}

#[async_trait]
impl<R: TaskRepository + ?Sized> TaskRepository for std::sync::Arc<R> {
    async fn list(&self) -> Result<Vec<Task>> {
        (**self).list().await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Task>> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        (**self).create(task).await
    }

    async fn update(&self, id: i32, update: UpdateTask) -> Result<Task> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: i32) -> Result<()> {
        (**self).delete(id).await
    }

    async fn health_check(&self) -> Result<()> {
        (**self).health_check().await
    }
}
