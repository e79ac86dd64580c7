//! Retry with exponential back-off, shared by every network-calling component.
//!
//! [`RetryPolicy::run`] wraps any fallible async operation. Each attempt is
//! independent and may be bounded by a per-attempt deadline; an expired
//! deadline is treated like any other transient failure.

use std::future::Future;
use std::time::Duration;

/// Classifies errors for [`RetryPolicy::run`].
pub trait RetryableError: std::fmt::Display {
    /// Returns `true` for transient failures worth another attempt.
    fn is_retryable(&self) -> bool;

    /// Builds the error reported when an attempt exceeds its deadline.
    fn timed_out(after: Duration) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the n-th retry is `backoff_base * 2^(n-1)`.
    pub backoff_base: Duration,
    /// Deadline applied to every individual attempt.
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    /// Three attempts, 2 s / 4 s back-off, 15 s per attempt.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(2),
            attempt_timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl RetryPolicy {
    const MAX_DELAY: Duration = Duration::from_secs(60);

    /// Single attempt, no deadline. Useful for tests and dry runs.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff_base: Duration::ZERO,
            attempt_timeout: None,
        }
    }

    /// Back-off before retry number `retry` (1-based), capped at 60 s.
    ///
    /// | Retry | Delay with base 2 s |
    /// |-------|---------------------|
    /// | 1     | 2 s                 |
    /// | 2     | 4 s                 |
    /// | 3     | 8 s                 |
    #[must_use]
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.backoff_base
            .saturating_mul(1u32 << exponent)
            .min(Self::MAX_DELAY)
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or `max_attempts` is exhausted. The last error is returned.
    ///
    /// # Errors
    ///
    /// Returns the operation's error once no further attempt will be made.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        E: RetryableError,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            let outcome = match self.attempt_timeout {
                Some(deadline) => match tokio::time::timeout(deadline, operation()).await {
                    Ok(result) => result,
                    Err(_) => Err(E::timed_out(deadline)),
                },
                None => operation().await,
            };

            let err = match outcome {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() || attempt >= max_attempts {
                if attempt > 1 {
                    tracing::warn!(label, attempt, error = %err, "giving up after retries");
                }
                return Err(err);
            }

            let delay = self.delay_before_retry(attempt);
            tracing::warn!(
                label,
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient error, retrying after back-off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
        Timeout,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl RetryableError for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient | TestError::Timeout)
        }

        fn timed_out(_after: Duration) -> Self {
            TestError::Timeout
        }
    }

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff_base: Duration::ZERO,
            attempt_timeout: None,
        }
    }

    #[test]
    fn default_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_before_retry(2), Duration::from_secs(4));
        assert_eq!(policy.delay_before_retry(3), Duration::from_secs(8));
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before_retry(30), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fast(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok::<u32, TestError>(42)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fast(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(TestError::Transient)
                    } else {
                        Ok(99)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fast(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(TestError::Transient)
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "3 attempts in total");
        assert_eq!(result, Err(TestError::Transient));
    }

    #[tokio::test]
    async fn does_not_retry_fatal_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fast(3)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(TestError::Fatal)
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, Err(TestError::Fatal));
    }

    #[tokio::test]
    async fn deadline_exceeded_is_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff_base: Duration::ZERO,
            attempt_timeout: Some(Duration::from_millis(20)),
        };
        let result = policy
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    Ok::<u32, TestError>(7)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let _ = fast(0)
            .run("test", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(TestError::Transient)
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
