use crate::{
    bootstrap::SchemaBootstrapper,
    common::{row_to_task, sqlx_error_to_task_error, status_to_string, TASK_COLUMNS},
    pool::{ConnectionSettings, PoolSettings},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, Transaction};
use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, UpdateTask},
    repository::TaskRepository,
    retry::RetryPolicy,
    validation::TaskValidator,
};

/// MySQL implementation of the TaskRepository trait
///
/// Every statement is parameterized and runs on a connection checked out
/// from a bounded pool. Writes that need to read their own result back run
/// inside a transaction so the re-read sees exactly the row just written.
#[derive(Debug, Clone)]
pub struct MySqlTaskRepository {
    pool: MySqlPool,
}

impl MySqlTaskRepository {
    /// Wrap an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Bootstrap the schema and open the pool, retrying transient failures
    ///
    /// # Arguments
    /// * `connection` - Server address, credentials and database name
    /// * `settings` - Pool bounds and timeouts
    /// * `retry` - Policy applied separately to the bootstrap and pool steps
    ///
    /// # Returns
    /// * `Ok(MySqlTaskRepository)` - Schema exists and the pool answered `SELECT 1`
    /// * `Err(TaskError)` - The first permanent error, or the last transient one
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::{ConnectionSettings, MySqlTaskRepository, PoolSettings};
    /// use task_core::RetryPolicy;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let repo = MySqlTaskRepository::connect(
    ///     &ConnectionSettings::default(),
    ///     &PoolSettings::default(),
    ///     RetryPolicy::default(),
    /// )
    /// .await?;
    /// repo.close().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(
        connection: &ConnectionSettings,
        settings: &PoolSettings,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let bootstrapper = SchemaBootstrapper::new(connection);
        retry.run("schema bootstrap", || bootstrapper.run()).await?;

        let pool = retry
            .run("pool creation", || settings.connect(connection))
            .await?;

        Ok(Self { pool })
    }

    /// Drain the pool: refuse new checkouts, wait for in-flight ones, close all connections
    pub async fn close(&self) {
        tracing::info!("Draining database connection pool");
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn fetch_in_tx(tx: &mut Transaction<'_, MySql>, id: i32) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(sqlx_error_to_task_error)?;

        row.as_ref().map(row_to_task).transpose()
    }
}

#[async_trait]
impl TaskRepository for MySqlTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        rows.iter().map(row_to_task).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        match row {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        TaskValidator::validate_new_task(&task)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(sqlx_error_to_task_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(status_to_string(task.status))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(sqlx_error_to_task_error)?;

        let id = i32::try_from(result.last_insert_id()).map_err(|_| {
            TaskError::Database(format!(
                "Inserted id {} does not fit the id column",
                result.last_insert_id()
            ))
        })?;

        let created = Self::fetch_in_tx(&mut tx, id).await?.ok_or_else(|| {
            TaskError::Database(format!("Inserted task {id} could not be read back"))
        })?;

        tx.commit().await.map_err(sqlx_error_to_task_error)?;

        tracing::debug!(task_id = created.id, "Task created");
        Ok(created)
    }

    async fn update(&self, id: i32, update: UpdateTask) -> Result<Task> {
        TaskValidator::validate_update(&update)?;

        let mut tx = self.pool.begin().await.map_err(sqlx_error_to_task_error)?;

        // MySQL reports 0 affected rows for an update that changes nothing,
        // so existence is decided by the re-read below.
        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(status_to_string(update.status))
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(sqlx_error_to_task_error)?;

        let updated = Self::fetch_in_tx(&mut tx, id)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))?;

        tx.commit().await.map_err(sqlx_error_to_task_error)?;

        tracing::debug!(task_id = id, status = %updated.status, "Task updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::not_found_id(id));
        }

        tracing::debug!(task_id = id, "Task deleted");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }
}
