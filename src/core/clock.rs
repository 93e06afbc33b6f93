//! Monotonic time sources for [`Timer`](super::Timer).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Monotonic time source.
///
/// `now` returns the time elapsed since an arbitrary, fixed origin. Only
/// differences between two readings are meaningful.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced explicitly by the host.
///
/// Clones share the same reading, so a host can keep one handle and hand
/// another to a machine. Useful for frame-time driven simulations and for
/// deterministic tests.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tickmind::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(handle.now(), Duration::from_millis(250));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Advance by fractional seconds. Negative, NaN and overflowing values are ignored.
    pub fn advance_secs(&self, secs: f64) {
        match Duration::try_from_secs_f64(secs) {
            Ok(by) => self.advance(by),
            Err(err) => warn!(secs, "manual clock not advanced: {err}"),
        }
    }

    /// Jump to an absolute reading. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        if to >= self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let clock = ManualClock::new();
        let other = clock.clone();
        other.advance_secs(1.5);
        assert_eq!(clock.now(), Duration::from_millis(1500));
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(3));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn manual_clock_ignores_invalid_seconds() {
        let clock = ManualClock::new();
        clock.advance_secs(2.0);
        clock.advance_secs(-0.5);
        clock.advance_secs(f64::NAN);
        clock.advance_secs(f64::INFINITY);
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn monotonic_clock_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
