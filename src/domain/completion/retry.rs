//! Explicit retry policy with exponential backoff

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::QaError;

/// Retry policy for completion-service calls.
///
/// `max_attempts` counts every attempt including the first. Only errors
/// reporting [`QaError::is_transient`] are retried; permanent failures
/// short-circuit. The delay before attempt `n + 1` is
/// `initial_delay * 2^(n-1)`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }

    /// Backoff delay after the given 1-based attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.initial_delay.saturating_mul(2u32.saturating_pow(exponent));
        delay.min(self.max_delay)
    }

    /// Sum of all backoff delays a fully exhausted run would sleep.
    ///
    /// Bounds the extra latency retries can add to a single call.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts).map(|n| self.delay_for_attempt(n)).sum()
    }

    /// Drive `operation` until it succeeds, fails permanently, or the
    /// attempt budget is exhausted.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, QaError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, QaError>>,
    {
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient completion failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(
            max_attempts,
            Duration::from_millis(1),
            Duration::from_millis(4),
        )
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(6, Duration::from_secs(1), Duration::from_secs(10));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(10));
        assert_eq!(policy.delay_for_attempt(6), Duration::from_secs(10));
    }

    #[test]
    fn test_total_backoff_is_bounded() {
        let policy = RetryPolicy::new(4, Duration::from_secs(1), Duration::from_secs(10));
        // 1s + 2s + 4s between four attempts
        assert_eq!(policy.total_backoff(), Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_transient_errors_exhaust_attempts() {
        let calls = AtomicUsize::new(0);

        let result: Result<(), QaError> = fast_policy(3)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(QaError::completion_transient("HTTP 503")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_short_circuits() {
        let calls = AtomicUsize::new(0);

        let result: Result<(), QaError> = fast_policy(3)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(QaError::completion_permanent("HTTP 404")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovery_after_transient_failure() {
        let calls = AtomicUsize::new(0);

        let result = fast_policy(3)
            .run(|| {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call == 0 {
                        Err(QaError::completion_transient("timeout"))
                    } else {
                        Ok("answer".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "answer");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_immediate_success_does_not_sleep() {
        let policy = RetryPolicy::new(3, Duration::from_secs(60), Duration::from_secs(60));
        let started = std::time::Instant::now();

        let result = policy.run(|| async { Ok::<_, QaError>(1) }).await;

        assert_eq!(result.unwrap(), 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
