//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources,
//! allowing production code to use real system time while tests can drive the
//! field register's debounce window by hand.
//!
//! # Example
//!
//! ```
//! use formstate::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let millis = clock.now_millis();
//! assert!(millis > 0);
//! ```

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for the debounce timer.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time as milliseconds since Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Test clock that only moves when told to.
///
/// A debounce window elapses exactly when the test advances the clock past it,
/// which keeps register tests free of sleeps.
///
/// # Example
///
/// ```
/// use formstate::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1000);
/// assert_eq!(clock.now_millis(), 1000);
/// assert_eq!(clock.now_millis(), 1000);
///
/// clock.advance(10);
/// assert_eq!(clock.now_millis(), 1010);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    millis: Mutex<u64>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a new fixed clock with the given initial time in milliseconds.
    pub fn new(millis: u64) -> Self {
        Self {
            millis: Mutex::new(millis),
        }
    }

    /// Advance the clock by the given number of milliseconds.
    pub fn advance(&self, ms: u64) {
        *self.millis.lock().unwrap() += ms;
    }

    /// Set the clock to a specific time in milliseconds.
    pub fn set(&self, ms: u64) {
        *self.millis.lock().unwrap() = ms;
    }

    /// Get the current time.
    pub fn get(&self) -> u64 {
        *self.millis.lock().unwrap()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.get()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1704067200000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedClock")
            .field("millis", &self.get())
            .finish()
    }
}
