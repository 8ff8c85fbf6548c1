//! Request policy: a deadline per attempt and one retry on transient failure.

use curso_error::{CursoError, CursoResult, UpstreamError, UpstreamErrorKind};
use derive_getters::Getters;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, instrument, warn};

/// How long to wait for the service and whether to try again.
///
/// # Examples
///
/// ```
/// use curso_content::RequestPolicy;
/// use std::time::Duration;
///
/// let policy = RequestPolicy::new(Duration::from_secs(30), Duration::from_millis(250));
/// assert_eq!(*policy.max_retries(), 1);
/// assert_eq!(*policy.timeout(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RequestPolicy {
    /// Deadline for a single attempt
    timeout: Duration,
    /// Delay before each retry
    retry_backoff: Duration,
    /// Extra attempts after the first; transient failures only
    max_retries: usize,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(90),
            retry_backoff: Duration::from_millis(500),
            max_retries: 1,
        }
    }
}

impl RequestPolicy {
    /// Policy with the given deadline and backoff and a single retry.
    pub fn new(timeout: Duration, retry_backoff: Duration) -> Self {
        Self {
            timeout,
            retry_backoff,
            max_retries: 1,
        }
    }

    /// Override the number of retries.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run `operation` under this policy.
    ///
    /// Each attempt is cut off after `timeout`. An attempt failing with a
    /// transient error (timeout, transport, retryable HTTP status) is retried
    /// up to `max_retries` times; any other error is returned immediately.
    #[instrument(skip(self, operation), fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn run<T, F, Fut>(&self, operation_name: &'static str, mut operation: F) -> CursoResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CursoResult<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, "Starting attempt");

            let outcome = match timeout(self.timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(CursoError::from(UpstreamError::new(
                    UpstreamErrorKind::Timeout(self.timeout.as_millis() as u64),
                ))),
            };

            match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    if !e.is_transient() {
                        warn!(error = %e, "Permanent failure, not retrying");
                        return Err(e);
                    }
                    if attempt > self.max_retries {
                        warn!(attempt, error = %e, "Retries exhausted");
                        return Err(e);
                    }
                    warn!(
                        attempt,
                        backoff_ms = self.retry_backoff.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    sleep(self.retry_backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curso_error::PayloadError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy() -> RequestPolicy {
        RequestPolicy::new(Duration::from_millis(50), Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_runs_once() {
        let calls = AtomicUsize::new(0);
        let result = fast_policy()
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, CursoError>(7) }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_retried_once() {
        let calls = AtomicUsize::new(0);
        let result = fast_policy()
            .run("test", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(CursoError::from(UpstreamError::new(UpstreamErrorKind::HttpStatus {
                            status_code: 503,
                            message: "busy".into(),
                        })))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_transient_failure_gives_up_after_one_retry() {
        let calls = AtomicUsize::new(0);
        let result: CursoResult<()> = fast_policy()
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(CursoError::from(UpstreamError::new(
                        UpstreamErrorKind::Transport("reset".into()),
                    )))
                }
            })
            .await;
        assert!(result.unwrap_err().is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: CursoResult<()> = fast_policy()
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(CursoError::from(PayloadError::malformed("nope"))) }
            })
            .await;
        assert!(result.unwrap_err().is_malformed_payload());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_attempt_times_out() {
        let calls = AtomicUsize::new(0);
        let result: CursoResult<()> = fast_policy()
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                }
            })
            .await;
        let err = result.unwrap_err();
        assert!(format!("{}", err).contains("timed out"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
