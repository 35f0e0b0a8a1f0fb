//! Bounded polling waits.
//!
//! Nothing in a smoke run sleeps for a fixed duration. Every asynchronous
//! page update is awaited by polling an observation until it is accepted or
//! the timeout expires.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default timeout for wait operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and poll interval for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Waits for a fallible condition to become true.
///
/// Errors from the condition are treated as "not yet" (a script can fail
/// while the document is still being replaced).
///
/// # Errors
///
/// Returns `WaitTimeout` when the timeout expires.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        if let Ok(true) = condition().await {
            return Ok(());
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// What was last seen when [`settle`] gave up.
#[derive(Debug)]
pub struct Unsettled<T> {
    /// The last successfully observed value, if the latest observation
    /// succeeded.
    pub last: Option<T>,
    /// The error from the latest observation, if it failed.
    pub last_error: Option<BrowserError>,
    /// How long we waited.
    pub timeout: Duration,
}

impl<T> Unsettled<T> {
    /// Converts into a plain `WaitTimeout`, dropping what was observed.
    pub fn into_timeout(self, condition: impl Into<String>) -> BrowserError {
        BrowserError::WaitTimeout {
            condition: condition.into(),
            timeout: self.timeout,
        }
    }
}

/// Polls `observe` until `accept` returns true for the observed value.
///
/// Unlike [`wait_for_result`], the observation itself is returned, and on
/// timeout the caller gets the last value or error back so it can report
/// what the page actually showed.
///
/// # Errors
///
/// Returns [`Unsettled`] holding the latest observation when the timeout
/// expires.
pub async fn settle<T, F, Fut, P>(
    observe: F,
    accept: P,
    config: WaitConfig,
) -> std::result::Result<T, Unsettled<T>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();

    loop {
        let (last, last_error) = match observe().await {
            Ok(value) if accept(&value) => return Ok(value),
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e)),
        };

        if start.elapsed() >= config.timeout {
            return Err(Unsettled {
                last,
                last_error,
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(100), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn wait_for_result_ignores_transient_errors() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result = wait_for_result(
            move || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BrowserError::ScriptExecutionFailed("not ready".into()))
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitConfig::with_timeout(Duration::from_secs(5)),
            "ready",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_for_result_times_out() {
        let result = wait_for_result(|| async { Ok(false) }, quick(), "impossible condition").await;

        assert!(matches!(result, Err(BrowserError::WaitTimeout { .. })));
    }

    #[tokio::test]
    async fn settle_returns_accepted_value() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let value = settle(
            move || {
                let c = c.clone();
                async move { Ok(c.fetch_add(1, Ordering::SeqCst)) }
            },
            |n| *n >= 2,
            WaitConfig::with_timeout(Duration::from_secs(5)),
        )
        .await
        .expect("should settle");

        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn settle_reports_last_value_on_timeout() {
        let unsettled = settle(
            || async { Ok("Paris, France".to_string()) },
            |text| text.contains("London"),
            quick(),
        )
        .await
        .expect_err("should not settle");

        assert_eq!(unsettled.last.as_deref(), Some("Paris, France"));
        assert!(unsettled.last_error.is_none());
    }

    #[tokio::test]
    async fn settle_reports_last_error_on_timeout() {
        let unsettled = settle(
            || async {
                Err::<String, _>(BrowserError::ElementNotFound {
                    selector: "#temp".into(),
                })
            },
            |_| true,
            quick(),
        )
        .await
        .expect_err("should not settle");

        assert!(unsettled.last.is_none());
        assert!(matches!(
            unsettled.last_error,
            Some(BrowserError::ElementNotFound { .. })
        ));
    }
}
