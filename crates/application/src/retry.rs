//! Fixed-delay retry for provider calls
//!
//! Synthesis and detection providers fail transiently often enough that a
//! few blind retries with a short pause recover most requests.

use std::{future::Future, time::Duration};

use tracing::warn;

use crate::error::ApplicationError;

/// Retry policy with a fixed delay between attempts
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first (default: 3)
    pub max_attempts: u32,
    /// Pause between attempts (default: 1s)
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with custom parameters
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run an async operation, retrying retryable failures.
    ///
    /// The last error is returned unchanged once attempts are exhausted.
    /// Non-retryable errors are returned immediately.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, ApplicationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApplicationError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < attempts => {
                    warn!(
                        attempt = attempt,
                        max_attempts = attempts,
                        error = %err,
                        "Operation failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                },
                Err(err) => {
                    warn!(attempt = attempt, error = %err, "Operation failed");
                    return Err(err);
                },
            }
        }
    }
}
