use crate::{
    error::{Result, TaskError},
    models::{NewTask, TaskStatus, UpdateTask},
};

/// Maximum title length in characters, matching the `VARCHAR(255)` column
pub const MAX_TITLE_LENGTH: usize = 255;

/// Validation utilities for task operations
pub struct TaskValidator;

impl TaskValidator {
    /// Validate a task title
    ///
    /// Titles must:
    /// - Contain at least one non-whitespace character
    /// - Be at most 255 characters long
    ///
    /// # Arguments
    /// * `title` - The title to validate
    ///
    /// # Returns
    /// * `Ok(())` - If the title is valid
    /// * `Err(TaskError::Validation)` - If the title is invalid
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(TaskError::empty_field("title"));
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(TaskError::Validation(format!(
                "Title must be at most {MAX_TITLE_LENGTH} characters long"
            )));
        }

        Ok(())
    }

    /// Validate a complete NewTask before insertion
    pub fn validate_new_task(task: &NewTask) -> Result<()> {
        Self::validate_title(&task.title)
    }

    /// Validate a replacement update before it is applied
    pub fn validate_update(update: &UpdateTask) -> Result<()> {
        Self::validate_title(&update.title)
    }

    /// Parse an optional status string supplied by a client
    ///
    /// A missing value means `pending`. Anything other than the three
    /// known snake_case names is rejected.
    ///
    /// # Returns
    /// * `Ok(TaskStatus)` - The parsed or defaulted status
    /// * `Err(TaskError::Validation)` - If the value is not a known status
    pub fn parse_status(value: Option<&str>) -> Result<TaskStatus> {
        match value {
            None => Ok(TaskStatus::default()),
            Some(raw) => raw.parse(),
        }
    }

    /// Parse a task identifier taken from a URL path segment
    ///
    /// Only strictly positive integers can ever name a row, so everything
    /// else is reported as not found rather than as a validation error.
    pub fn parse_task_id(raw: &str) -> Result<i32> {
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(TaskError::NotFound(format!("Task with ID '{raw}' not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(TaskValidator::validate_title("Buy milk").is_ok());
        assert!(TaskValidator::validate_title("a").is_ok());
        assert!(TaskValidator::validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());

        assert!(TaskValidator::validate_title("").is_err());
        assert!(TaskValidator::validate_title("   ").is_err());
        assert!(TaskValidator::validate_title("\t\n").is_err());
        assert!(TaskValidator::validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 255 two-byte characters are 510 bytes but still a valid title
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(TaskValidator::validate_title(&title).is_ok());
    }

    #[test]
    fn test_validate_new_task_and_update() {
        assert!(TaskValidator::validate_new_task(&NewTask::new("Write report")).is_ok());
        assert!(TaskValidator::validate_new_task(&NewTask::new("")).is_err());

        let update = UpdateTask::new("", "desc", TaskStatus::Completed);
        let err = TaskValidator::validate_update(&update).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(TaskValidator::parse_status(None).unwrap(), TaskStatus::Pending);
        assert_eq!(
            TaskValidator::parse_status(Some("in_progress")).unwrap(),
            TaskStatus::InProgress
        );
        assert!(TaskValidator::parse_status(Some("invalid_status")).is_err());
        assert!(TaskValidator::parse_status(Some("")).is_err());
        assert!(TaskValidator::parse_status(Some("Completed")).is_err());
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(TaskValidator::parse_task_id("1").unwrap(), 1);
        assert_eq!(TaskValidator::parse_task_id("999999").unwrap(), 999999);

        for raw in ["0", "-3", "abc", "1.5", "", "99999999999"] {
            let err = TaskValidator::parse_task_id(raw).unwrap_err();
            assert!(err.is_not_found(), "expected not found for {raw:?}");
        }
    }
}
