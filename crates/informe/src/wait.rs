//! Condition polling with a timeout.
//!
//! The embedding driver typically has to wait for something external to
//! settle before reading results: a finished-marker in a page, an event
//! file appearing on disk. [`wait_for`] polls a condition at a fixed
//! interval until it holds or the timeout elapses.

use crate::result::{InformeError, InformeResult};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (120 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 120_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone)]
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
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }
}

/// Trait for custom wait conditions
pub trait WaitCondition {
    /// Check if the condition is satisfied
    fn check(&self) -> bool;

    /// Get description for error messages
    fn description(&self) -> String;
}

/// A function-based wait condition
pub struct FnCondition<F: Fn() -> bool> {
    func: F,
    description: String,
}

impl<F: Fn() -> bool> std::fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F: Fn() -> bool> FnCondition<F> {
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F: Fn() -> bool> WaitCondition for FnCondition<F> {
    fn check(&self) -> bool {
        (self.func)()
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Poll a condition until it holds or the timeout elapses
///
/// The condition is checked once immediately, so a zero timeout still
/// succeeds for an already-true condition.
pub fn wait_for<C: WaitCondition>(
    condition: &C,
    options: &WaitOptions,
) -> InformeResult<WaitResult> {
    let start = Instant::now();
    let timeout = Duration::from_millis(options.timeout_ms);
    let poll_interval = Duration::from_millis(options.poll_interval_ms);

    loop {
        if condition.check() {
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                waited_for: condition.description(),
            });
        }
        if start.elapsed() >= timeout {
            return Err(InformeError::Timeout {
                ms: options.timeout_ms,
            });
        }
        std::thread::sleep(poll_interval);
    }
}

/// Wait for a predicate with default polling
pub fn wait_until<F>(predicate: F, timeout_ms: u64) -> InformeResult<()>
where
    F: Fn() -> bool,
{
    let condition = FnCondition::new(predicate, "custom predicate");
    let options = WaitOptions::new().with_timeout(timeout_ms);
    wait_for(&condition, &options).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_already_true_condition_returns_immediately() {
        let result = wait_until(|| true, 0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_timeout_on_never_true_condition() {
        let options = WaitOptions::new().with_timeout(50).with_poll_interval(10);
        let condition = FnCondition::new(|| false, "never");
        let err = wait_for(&condition, &options).unwrap_err();
        assert!(matches!(err, InformeError::Timeout { ms: 50 }));
    }

    #[test]
    fn test_condition_becoming_true_mid_wait() {
        let checks = AtomicUsize::new(0);
        let condition = FnCondition::new(
            || checks.fetch_add(1, Ordering::SeqCst) >= 2,
            "third check wins",
        );
        let options = WaitOptions::new().with_timeout(5_000).with_poll_interval(5);
        let result = wait_for(&condition, &options).unwrap();
        assert_eq!(result.waited_for, "third check wins");
    }

    #[test]
    fn test_options_builders() {
        let options = WaitOptions::new().with_timeout(1_000).with_poll_interval(25);
        assert_eq!(options.timeout_ms, 1_000);
        assert_eq!(options.poll_interval_ms, 25);
    }

    #[test]
    fn test_defaults_match_driver_settings() {
        let options = WaitOptions::default();
        assert_eq!(options.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(options.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }
}
