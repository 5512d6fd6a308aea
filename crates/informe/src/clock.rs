//! Clock handle for deterministic timestamps.
//!
//! The collector stamps every lifecycle event with the current time. Tests
//! install a fixed time on a [`FakeClock`] and advance it between events to
//! get exact durations; when nothing is installed the clock reads system
//! time.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Fake clock over milliseconds since the Unix epoch
#[derive(Debug, Default)]
pub struct FakeClock {
    /// Pinned time when installed
    fixed_ms: AtomicU64,
    /// Whether the pinned time is active
    installed: AtomicBool,
}

impl FakeClock {
    /// Create a new clock reading system time
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the clock to a fixed time
    pub fn install(&self, time_ms: u64) {
        self.fixed_ms.store(time_ms, Ordering::SeqCst);
        self.installed.store(true, Ordering::SeqCst);
    }

    /// Return to system time
    pub fn uninstall(&self) {
        self.installed.store(false, Ordering::SeqCst);
    }

    /// Check whether a fixed time is active
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Advance the pinned time. No-op when reading system time.
    pub fn advance_ms(&self, ms: u64) {
        if self.is_installed() {
            self.fixed_ms.fetch_add(ms, Ordering::SeqCst);
        }
    }

    /// Advance the pinned time by a duration
    pub fn advance(&self, duration: Duration) {
        self.advance_ms(duration.as_millis() as u64);
    }

    /// Current time in milliseconds since the Unix epoch
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        if self.is_installed() {
            return self.fixed_ms.load(Ordering::SeqCst);
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Thread-safe clock handle
pub type Clock = Arc<FakeClock>;

/// Create a new shared clock
#[must_use]
pub fn create_clock() -> Clock {
    Arc::new(FakeClock::new())
}
