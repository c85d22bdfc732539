//! Retry logic with exponential backoff
//!
//! Only throttling and timeout answers from the market data provider are
//! retried. Every other failure is returned on the first attempt.

use crate::error::{MarketDataError, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (typically 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(4),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
        }
    }

    /// Wait before the given retry (1 for the first retry)
    pub fn backoff_duration(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi((retry - 1) as i32);

        Duration::from_millis(backoff_ms as u64).min(self.max_backoff)
    }

    /// Request timeout (408) and rate limiting (429) are the only transient answers
    pub fn is_retryable(error: &MarketDataError) -> bool {
        matches!(error, MarketDataError::Http { status: 408 | 429 })
    }

    /// Execute an async operation with retry logic
    ///
    /// # Arguments
    ///
    /// * `operation_name` - Name of the operation (for logging)
    /// * `operation` - Async operation to execute
    ///
    /// # Returns
    ///
    /// Result of the operation, or the last error if all attempts fail
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!("Attempt {}/{} for operation: {}", attempt, attempts, operation_name);

            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(
                            "Operation '{}' succeeded after {} retries",
                            operation_name,
                            attempt - 1
                        );
                    }
                    return Ok(result);
                }
                Err(e) if !Self::is_retryable(&e) => {
                    debug!("Operation '{}' failed with non-retryable error", operation_name);
                    return Err(e);
                }
                Err(e) if attempt >= attempts => {
                    warn!(
                        "Operation '{}' failed after {} attempts: {}",
                        operation_name, attempts, e
                    );
                    return Err(e);
                }
                Err(e) => {
                    let backoff = self.backoff_duration(attempt);
                    warn!(
                        "Operation '{}' failed (attempt {}/{}): {}. Retrying in {:?}",
                        operation_name, attempt, attempts, e, backoff
                    );
                    sleep(backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_secs(4));
        assert_eq!(policy.max_backoff, Duration::from_secs(10));
        assert!((policy.backoff_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backoff_calculation() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_duration(0), Duration::ZERO);
        assert_eq!(policy.backoff_duration(1), Duration::from_secs(4));
        assert_eq!(policy.backoff_duration(2), Duration::from_secs(8));
        // Capped
        assert_eq!(policy.backoff_duration(3), Duration::from_secs(10));
        assert_eq!(policy.backoff_duration(8), Duration::from_secs(10));
    }

    #[test]
    fn test_is_retryable() {
        assert!(RetryPolicy::is_retryable(&MarketDataError::Http { status: 408 }));
        assert!(RetryPolicy::is_retryable(&MarketDataError::Http { status: 429 }));

        assert!(!RetryPolicy::is_retryable(&MarketDataError::Http { status: 404 }));
        assert!(!RetryPolicy::is_retryable(&MarketDataError::Http { status: 500 }));
        assert!(!RetryPolicy::is_retryable(&MarketDataError::InvalidInterval(
            "bogus".to_string()
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_success_after_retry() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let count = attempts.clone();
        let started = Instant::now();

        let result = policy
            .execute("test_op", || {
                let count = count.clone();
                async move {
                    if count.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(MarketDataError::Http { status: 429 })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // 4s then 8s
        assert!(started.elapsed() >= Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_all_attempts_fail() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let count = attempts.clone();

        let result: Result<()> = policy
            .execute("test_op", || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(MarketDataError::Http { status: 408 })
                }
            })
            .await;

        assert!(matches!(result, Err(MarketDataError::Http { status: 408 })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_non_retryable_error() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let count = attempts.clone();
        let started = Instant::now();

        let result: Result<()> = policy
            .execute("test_op", || {
                let count = count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Err(MarketDataError::Http { status: 404 })
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1); // Should not retry
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
