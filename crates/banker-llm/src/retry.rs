//! Retry policy with exponential backoff for remote model calls
//!
//! Every gateway invocation runs under one of these policies so transient
//! service failures (rate limits, temporary unavailability) are recovered
//! locally and uniformly.

use crate::error::{GatewayError, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts (first try included)
    pub max_attempts: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Backoff multiplier (typically 2.0)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 2s, 4s, then give up: matches the service's rate-limit guidance
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(30),
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

    /// Create a policy with no retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_secs(0),
            max_backoff: Duration::from_secs(0),
            backoff_multiplier: 1.0,
        }
    }

    /// Create a policy with millisecond backoffs (for testing)
    pub fn fast() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(100),
            backoff_multiplier: 2.0,
        }
    }

    /// Calculate backoff duration before a given attempt (1-based)
    fn backoff_duration(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);
        let backoff = Duration::from_millis(backoff_ms as u64);

        if backoff > self.max_backoff {
            self.max_backoff
        } else {
            backoff
        }
    }

    /// Execute an async operation under this policy.
    ///
    /// Only transient errors are retried; anything else propagates
    /// immediately. After exhausting all attempts the last error
    /// propagates to the caller.
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "Operation '{}' succeeded after {} retries",
                            operation_name, attempt
                        );
                    }
                    return Ok(result);
                }
                Err(e) => {
                    if !e.is_transient() {
                        debug!(
                            "Operation '{}' failed with non-transient error: {}",
                            operation_name, e
                        );
                        return Err(e);
                    }

                    last_error = Some(e);

                    if attempt + 1 < self.max_attempts {
                        let backoff = self.backoff_duration(attempt + 1);
                        warn!(
                            "Operation '{}' hit a transient error (attempt {}/{}): {:?}. Retrying in {:?}",
                            operation_name,
                            attempt + 1,
                            self.max_attempts,
                            last_error,
                            backoff
                        );
                        sleep(backoff).await;
                    }
                }
            }
        }

        let error = last_error.unwrap_or_else(|| {
            GatewayError::RequestFailed("retry loop exhausted with no error".to_string())
        });

        warn!(
            "Operation '{}' failed after {} attempts: {}",
            operation_name, self.max_attempts, error
        );

        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[test]
    fn test_default_policy_matches_service_guidance() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_secs(2));
        assert_eq!(policy.backoff_multiplier, 2.0);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_duration(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_duration(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_duration(3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let policy = RetryPolicy::new(10, Duration::from_secs(2), Duration::from_secs(8), 2.0);
        assert_eq!(policy.backoff_duration(6), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_success_after_two_transient_failures() {
        let policy = RetryPolicy::fast();
        let attempts = Arc::new(Mutex::new(0));
        let count = attempts.clone();

        let result = policy
            .execute("quote_fetch", || {
                let count = count.clone();
                async move {
                    let mut n = count.lock().await;
                    *n += 1;
                    if *n < 3 {
                        Err(GatewayError::RateLimited("busy".into()))
                    } else {
                        Ok::<_, GatewayError>("payload".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result.expect("should succeed on attempt 3"), "payload");
        assert_eq!(*attempts.lock().await, 3);
    }

    #[tokio::test]
    async fn test_transient_on_all_attempts_propagates_last_error() {
        let policy = RetryPolicy::fast();
        let attempts = Arc::new(Mutex::new(0));
        let count = attempts.clone();

        let result = policy
            .execute("quote_fetch", || {
                let count = count.clone();
                async move {
                    let mut n = count.lock().await;
                    *n += 1;
                    Err::<String, _>(GatewayError::ServiceUnavailable(format!("try {}", *n)))
                }
            })
            .await;

        match result {
            Err(GatewayError::ServiceUnavailable(msg)) => assert_eq!(msg, "try 3"),
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
        assert_eq!(*attempts.lock().await, 3);
    }

    #[tokio::test]
    async fn test_non_transient_propagates_immediately() {
        let policy = RetryPolicy::fast();
        let attempts = Arc::new(Mutex::new(0));
        let count = attempts.clone();

        let result = policy
            .execute("analysis", || {
                let count = count.clone();
                async move {
                    *count.lock().await += 1;
                    Err::<String, _>(GatewayError::AuthenticationFailed)
                }
            })
            .await;

        assert!(matches!(result, Err(GatewayError::AuthenticationFailed)));
        assert_eq!(*attempts.lock().await, 1);
    }
}
