//! Call-scoped explicit waits.
//!
//! Each wait carries its own timeout and polling interval; there is no
//! session-wide implicit wait to toggle. A condition that never becomes
//! true surfaces as [`CafeteraError::Timeout`], which callers either treat
//! as absence (for optional UI) or propagate.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::{CafeteraError, CafeteraResult};

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for one wait operation
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// New options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Short budget for "expect absence" checks, where a full default wait
    /// would only slow the suite down
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            timeout_ms: 500,
            poll_interval_ms: 25,
        }
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `check` until it returns `Ok(true)` or the budget expires.
///
/// Errors from `check` other than timeouts propagate immediately; a check
/// that keeps reporting `false` ends in [`CafeteraError::Timeout`].
pub async fn wait_until<F, Fut>(options: WaitOptions, check: F) -> CafeteraResult<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = CafeteraResult<bool>>,
{
    let start = Instant::now();
    loop {
        if check().await? {
            return Ok(());
        }
        if start.elapsed() >= options.timeout() {
            return Err(CafeteraError::Timeout {
                ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_wait_options_defaults() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_wait_options_chained() {
        let opts = WaitOptions::new().with_timeout(1000).with_poll_interval(10);
        assert_eq!(opts.timeout(), Duration::from_millis(1000));
        assert_eq!(opts.poll_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_fast_options_are_shorter_than_default() {
        let fast = WaitOptions::fast();
        assert!(fast.timeout_ms < DEFAULT_WAIT_TIMEOUT_MS);
    }

    #[tokio::test]
    async fn test_wait_until_immediate_success() {
        let result = wait_until(WaitOptions::new().with_timeout(100), || async { Ok(true) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wait_until_eventual_success() {
        let calls = AtomicU32::new(0);
        let result = wait_until(
            WaitOptions::new().with_timeout(1000).with_poll_interval(5),
            || async { Ok(calls.fetch_add(1, Ordering::SeqCst) >= 3) },
        )
        .await;
        assert!(result.is_ok());
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn test_wait_until_timeout() {
        let result = wait_until(
            WaitOptions::new().with_timeout(50).with_poll_interval(5),
            || async { Ok(false) },
        )
        .await;
        match result {
            Err(CafeteraError::Timeout { ms }) => assert_eq!(ms, 50),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wait_until_propagates_check_errors() {
        let result = wait_until(WaitOptions::new().with_timeout(100), || async {
            Err(CafeteraError::Script {
                message: "boom".to_string(),
            })
        })
        .await;
        assert!(matches!(result, Err(CafeteraError::Script { .. })));
    }
}
