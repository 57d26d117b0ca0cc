use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded retry with exponential backoff for transient storage failures.
///
/// Only errors for which [`TaskError::is_transient`] holds are retried.
/// The delay starts at `initial_backoff` and doubles after every failed
/// attempt, capped at `max_backoff`.
///
/// # Examples
///
/// ```rust
/// use task_core::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(1));
/// assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
/// assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
        }
    }

    /// A policy that makes exactly one attempt
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.initial_backoff.saturating_mul(1u32 << exponent);
        delay.min(self.max_backoff)
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out
    ///
    /// # Arguments
    /// * `label` - Name of the operation, used in log events
    /// * `operation` - Factory producing a fresh future per attempt
    ///
    /// # Returns
    /// * `Ok(T)` - The first successful result
    /// * `Err(TaskError)` - The first non-transient error, or the last transient one
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < max_attempts => {
                    let delay = self.backoff_for(attempt);
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Convenience for configuration code that holds attempts and millis
impl TryFrom<(u32, u64, u64)> for RetryPolicy {
    type Error = TaskError;

    fn try_from((attempts, initial_ms, max_ms): (u32, u64, u64)) -> Result<Self> {
        if attempts == 0 {
            return Err(TaskError::Configuration(
                "Retry attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self::new(
            attempts,
            Duration::from_millis(initial_ms),
            Duration::from_millis(max_ms.max(initial_ms)),
        ))
    }
}
