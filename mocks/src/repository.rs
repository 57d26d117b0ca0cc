//! Mock implementation of TaskRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Strictly increasing timestamps so ordering tests are deterministic

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};
use task_core::{NewTask, Result, Task, TaskError, TaskRepository, TaskValidator, UpdateTask};

/// Mock implementation of TaskRepository for testing
///
/// Features:
/// - Thread-safe concurrent access
/// - One-shot error injection for failure testing
/// - Call history tracking for verification
/// - Same validation and not-found behavior as the MySQL repository
#[derive(Clone)]
pub struct MockTaskRepository {
    tasks: Arc<Mutex<HashMap<i32, Task>>>,
    next_id: Arc<AtomicI32>,
    clock: Arc<Mutex<DateTime<Utc>>>,
    error_injection: Arc<Mutex<Option<TaskError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_next_id(1)
    }

    /// Create mock repository with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let latest = tasks
            .iter()
            .map(|t| t.updated_at.max(t.created_at))
            .max()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let repo = Self::with_next_id(max_id + 1);
        {
            let mut clock = repo.clock.lock();
            *clock = (*clock).max(latest);
        }
        repo.tasks
            .lock()
            .extend(tasks.into_iter().map(|task| (task.id, task)));
        repo
    }

    /// Create mock repository with specific starting ID
    pub fn with_next_id(next_id: i32) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(next_id)),
            clock: Arc::new(Mutex::new(DateTime::<Utc>::MIN_UTC)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TaskError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called unexpectedly. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        match self.error_injection.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Next timestamp, strictly later than any handed out before
    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock();
        let now = Utc::now().max(*clock + Duration::microseconds(1));
        *clock = now;
        now
    }

    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        self.record_call("list");
        self.check_error_injection()?;

        let mut tasks: Vec<Task> = self.tasks.lock().values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Task>> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.tasks.lock().get(&id).cloned())
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        self.record_call_with_params("create", &format!("title={}", task.title));
        self.check_error_injection()?;
        TaskValidator::validate_new_task(&task)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = self.tick();

        let new_task = Task {
            id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: now,
            updated_at: now,
        };

        self.tasks.lock().insert(id, new_task.clone());
        Ok(new_task)
    }

    async fn update(&self, id: i32, update: UpdateTask) -> Result<Task> {
        self.record_call_with_params("update", &format!("id={id}"));
        self.check_error_injection()?;
        TaskValidator::validate_update(&update)?;

        let now = self.tick();
        let mut tasks = self.tasks.lock();
        let task = tasks.get_mut(&id).ok_or_else(|| TaskError::not_found_id(id))?;
        task.apply_update(update, now);

        Ok(task.clone())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.record_call_with_params("delete", &format!("id={id}"));
        self.check_error_injection()?;

        self.tasks
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| TaskError::not_found_id(id))
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check");
        self.check_error_injection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_core::TaskStatus;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MockTaskRepository::new();
        let first = repo.create(NewTask::new("first")).await.unwrap();
        let second = repo.create(NewTask::new("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at > first.created_at);
        repo.assert_called("create");
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let repo = MockTaskRepository::new();
        repo.inject_error(TaskError::Database("boom".to_string()));

        assert!(repo.list().await.is_err());
        assert!(repo.list().await.is_ok());
    }

    #[tokio::test]
    async fn test_update_advances_updated_at() {
        let repo = MockTaskRepository::new();
        let created = repo.create(NewTask::new("task")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateTask::new("task", "", TaskStatus::Pending),
            )
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_with_tasks_continues_ids() {
        let now = Utc::now();
        let seeded = Task {
            id: 7,
            title: "seeded".to_string(),
            description: String::new(),
            status: TaskStatus::Completed,
            created_at: now,
            updated_at: now,
        };
        let repo = MockTaskRepository::with_tasks(vec![seeded]);

        let created = repo.create(NewTask::new("next")).await.unwrap();
        assert_eq!(created.id, 8);
        assert!(created.created_at > now);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let repo = MockTaskRepository::new();
        let err = repo.create(NewTask::new("  ")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(repo.is_empty());
    }
}
