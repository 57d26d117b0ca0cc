use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, Row};
use task_core::{
    error::{Result, TaskError},
    models::{Task, TaskStatus},
};

/// Column list shared by every SELECT; the ENUM is cast so it decodes as text
pub const TASK_COLUMNS: &str =
    "id, title, description, CAST(status AS CHAR) AS status, created_at, updated_at";

/// Convert TaskStatus enum to string for database storage
pub fn status_to_string(status: TaskStatus) -> &'static str {
    status.as_str()
}

/// Convert string from database to TaskStatus enum
pub fn string_to_status(s: &str) -> Result<TaskStatus> {
    s.parse::<TaskStatus>()
        .map_err(|_| TaskError::Database(format!("Invalid task status in database: {s}")))
}

/// Convert MySQL row to Task model
pub fn row_to_task(row: &MySqlRow) -> Result<Task> {
    let status_str: String = row.try_get("status").map_err(sqlx_error_to_task_error)?;
    let status = string_to_status(&status_str)?;

    let description: Option<String> = row
        .try_get("description")
        .map_err(sqlx_error_to_task_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(sqlx_error_to_task_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(sqlx_error_to_task_error)?;

    Ok(Task {
        id: row.try_get("id").map_err(sqlx_error_to_task_error)?,
        title: row.try_get("title").map_err(sqlx_error_to_task_error)?,
        description: description.unwrap_or_default(),
        status,
        created_at,
        updated_at,
    })
}

/// Convert SQLx error to TaskError
///
/// Failures to reach the server or to obtain a pooled connection become
/// `TaskError::Connection`, which the startup retry loop treats as transient.
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().unwrap_or_default();
            TaskError::Database(format!(
                "Database error {code}: {}",
                db_err.message()
            ))
        }
        sqlx::Error::RowNotFound => {
            // Lookups use fetch_optional, so reaching this is a logic error
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => {
            TaskError::Connection("Connection pool timeout".to_string())
        }
        sqlx::Error::PoolClosed => TaskError::Connection("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Connection(format!("Database I/O error: {io_err}")),
        sqlx::Error::Tls(tls_err) => TaskError::Connection(format!("Database TLS error: {tls_err}")),
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversions() {
        assert_eq!(status_to_string(TaskStatus::Pending), "pending");
        assert_eq!(status_to_string(TaskStatus::InProgress), "in_progress");
        assert_eq!(status_to_string(TaskStatus::Completed), "completed");

        assert_eq!(string_to_status("pending").unwrap(), TaskStatus::Pending);
        assert_eq!(string_to_status("in_progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(string_to_status("completed").unwrap(), TaskStatus::Completed);

        // A bad value in a row is a storage problem, not a client one
        let err = string_to_status("archived").unwrap_err();
        assert!(err.is_database());
    }

    #[test]
    fn test_error_mapping() {
        assert!(sqlx_error_to_task_error(sqlx::Error::PoolTimedOut).is_transient());
        assert!(sqlx_error_to_task_error(sqlx::Error::PoolClosed).is_transient());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(sqlx_error_to_task_error(sqlx::Error::Io(io)).is_transient());

        let err = sqlx_error_to_task_error(sqlx::Error::RowNotFound);
        assert!(err.is_database());
        assert!(!err.is_transient());

        let err = sqlx_error_to_task_error(sqlx::Error::Protocol("bad packet".to_string()));
        assert!(matches!(err, TaskError::Database(_)));
    }

    #[test]
    fn test_task_columns_cast_status() {
        assert!(TASK_COLUMNS.contains("CAST(status AS CHAR) AS status"));
        assert!(TASK_COLUMNS.starts_with("id, title, description"));
    }
}
