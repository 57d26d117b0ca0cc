use sqlx::{ConnectOptions, Connection};
use task_core::error::{Result, TaskError};
use tracing::{debug, info};

use crate::{common::sqlx_error_to_task_error, pool::ConnectionSettings};

/// Idempotent DDL for the single `tasks` table
pub const CREATE_TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    status ENUM('pending', 'in_progress', 'completed') NOT NULL DEFAULT 'pending',
    created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
"#;

/// Longest identifier MySQL accepts for a schema name
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Ensures the database and the `tasks` table exist before the pool is built
///
/// The bootstrap uses its own short-lived connections and closes them when
/// done, so nothing it opens outlives startup.
pub struct SchemaBootstrapper<'a> {
    connection: &'a ConnectionSettings,
}

impl<'a> SchemaBootstrapper<'a> {
    pub fn new(connection: &'a ConnectionSettings) -> Self {
        Self { connection }
    }

    /// Validate a database name for use as an unquoted-safe identifier
    ///
    /// Identifiers cannot be bound as statement parameters, so the name is
    /// restricted to `[A-Za-z0-9_$]` and 1-64 characters before it is ever
    /// placed into SQL text.
    pub fn validate_identifier(name: &str) -> Result<()> {
        if name.is_empty() || name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(TaskError::Configuration(format!(
                "Database name must be 1-{MAX_IDENTIFIER_LENGTH} characters long"
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(TaskError::Configuration(format!(
                "Database name '{name}' may only contain letters, digits, '_' and '$'"
            )));
        }

        Ok(())
    }

    /// Create the database if absent, then the `tasks` table if absent
    ///
    /// # Returns
    /// * `Ok(())` - Schema is ready
    /// * `Err(TaskError::Configuration)` - If the database name is not a safe identifier
    /// * `Err(TaskError::Connection)` - If the server cannot be reached (retryable)
    /// * `Err(TaskError::Database)` - If the server rejects a statement
    pub async fn run(&self) -> Result<()> {
        let database = &self.connection.database;
        Self::validate_identifier(database)?;

        info!(url = %self.connection.redacted_url(), "Bootstrapping database schema");

        let mut server = self
            .connection
            .server_options()
            .connect()
            .await
            .map_err(sqlx_error_to_task_error)?;

        let create_database = format!("CREATE DATABASE IF NOT EXISTS `{database}`");
        sqlx::query(&create_database)
            .execute(&mut server)
            .await
            .map_err(sqlx_error_to_task_error)?;
        debug!(database = %database, "Database present");

        server.close().await.map_err(sqlx_error_to_task_error)?;

        let mut conn = self
            .connection
            .database_options()
            .connect()
            .await
            .map_err(sqlx_error_to_task_error)?;

        sqlx::query(CREATE_TASKS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(sqlx_error_to_task_error)?;

        conn.close().await.map_err(sqlx_error_to_task_error)?;

        info!(database = %database, "Database schema ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier_accepts_plain_names() {
        for name in ["tasks_db", "Tasks", "db$1", "a", &"x".repeat(64)] {
            assert!(
                SchemaBootstrapper::validate_identifier(name).is_ok(),
                "expected {name:?} to be accepted"
            );
        }
    }

    #[test]
    fn test_validate_identifier_rejects_unsafe_names() {
        for name in [
            "",
            "tasks-db",
            "tasks db",
            "tasks`; DROP DATABASE mysql; --",
            "ta.sks",
            "tâches",
            &"x".repeat(65),
        ] {
            let err = SchemaBootstrapper::validate_identifier(name).unwrap_err();
            assert!(matches!(err, TaskError::Configuration(_)), "{name:?}");
        }
    }

    #[test]
    fn test_schema_shape() {
        assert!(CREATE_TASKS_TABLE.contains("CREATE TABLE IF NOT EXISTS tasks"));
        assert!(CREATE_TASKS_TABLE.contains("ENUM('pending', 'in_progress', 'completed')"));
        assert!(CREATE_TASKS_TABLE.contains("DEFAULT 'pending'"));
        assert!(CREATE_TASKS_TABLE.contains("TIMESTAMP(6)"));
    }

    #[tokio::test]
    async fn test_run_rejects_bad_identifier_before_connecting() {
        let connection = ConnectionSettings {
            // Unroutable port; the identifier check must fail first
            port: 1,
            database: "bad-name".to_string(),
            ..Default::default()
        };

        let err = SchemaBootstrapper::new(&connection).run().await.unwrap_err();
        assert!(matches!(err, TaskError::Configuration(_)));
    }
}
