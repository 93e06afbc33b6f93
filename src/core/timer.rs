//! Restartable, pausable phase timer.

use super::clock::{Clock, MonotonicClock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// Notification delivered to timer observers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TimerEvent {
    Start,
    Pause,
    Unpause,
    Reset,
}

type Observer = Box<dyn FnMut(TimerEvent)>;

/// Measures the time spent in the current phase.
///
/// Readings are in seconds and exclude time spent paused. Observers are called
/// synchronously, in registration order.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use tickmind::core::{ManualClock, Timer};
///
/// let clock = ManualClock::new();
/// let mut timer = Timer::with_clock(Rc::new(clock.clone()));
///
/// timer.begin();
/// clock.advance_secs(2.0);
/// timer.pause();
/// clock.advance_secs(10.0);
/// timer.unpause();
/// clock.advance_secs(1.0);
///
/// assert!((timer.elapsed_seconds() - 3.0).abs() < 1e-9);
/// ```
pub struct Timer {
    clock: Rc<dyn Clock>,
    start: f64,
    pause_start: f64,
    paused_total: f64,
    elapsed: f64,
    running: bool,
    paused: bool,
    observers: Vec<Observer>,
}

impl Timer {
    /// Timer backed by a [`MonotonicClock`].
    pub fn new() -> Self {
        Self::with_clock(Rc::new(MonotonicClock::new()))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            start: 0.0,
            pause_start: 0.0,
            paused_total: 0.0,
            elapsed: 0.0,
            running: false,
            paused: false,
            observers: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Register an observer for start/pause/unpause/reset notifications.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(TimerEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Reset, then start timing from now.
    pub fn begin(&mut self) {
        self.reset();
        self.start = self.now();
        self.running = true;
        self.notify(TimerEvent::Start);
    }

    pub fn pause(&mut self) {
        if !self.running || self.paused {
            warn!("cannot pause timer: not running or already paused");
            return;
        }
        let now = self.now();
        self.elapsed = now - self.start - self.paused_total;
        self.pause_start = now;
        self.running = false;
        self.paused = true;
        self.notify(TimerEvent::Pause);
    }

    pub fn unpause(&mut self) {
        if self.running || !self.paused {
            warn!("cannot unpause timer: already running or not paused");
            return;
        }
        self.paused_total += self.now() - self.pause_start;
        self.running = true;
        self.paused = false;
        self.notify(TimerEvent::Unpause);
    }

    /// Zero every field and stop.
    pub fn reset(&mut self) {
        self.start = 0.0;
        self.pause_start = 0.0;
        self.paused_total = 0.0;
        self.elapsed = 0.0;
        self.running = false;
        self.paused = false;
        self.notify(TimerEvent::Reset);
    }

    /// Seconds elapsed since `begin`, excluding paused spans.
    ///
    /// While paused or stopped this is the last value frozen by `pause`
    /// (zero after `reset`).
    pub fn elapsed_seconds(&self) -> f64 {
        if self.running {
            (self.now() - self.start - self.paused_total).max(0.0)
        } else {
            self.elapsed
        }
    }

    pub fn minutes(&self) -> u64 {
        (self.elapsed_seconds() / 60.0) as u64
    }

    /// Whole seconds, modulo 60.
    pub fn seconds(&self) -> u64 {
        (self.elapsed_seconds() % 60.0) as u64
    }

    /// Sub-second remainder in milliseconds.
    pub fn milliseconds(&self) -> f64 {
        let elapsed = self.elapsed_seconds();
        (elapsed - elapsed.floor()) * 1000.0
    }

    fn now(&self) -> f64 {
        self.clock.now().as_secs_f64()
    }

    fn notify(&mut self, event: TimerEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("elapsed", &self.elapsed_seconds())
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::cell::RefCell;

    fn timer() -> (ManualClock, Timer) {
        let clock = ManualClock::new();
        let timer = Timer::with_clock(Rc::new(clock.clone()));
        (clock, timer)
    }

    #[test]
    fn new_timer_reads_zero() {
        let (clock, timer) = timer();
        clock.advance_secs(5.0);
        assert_eq!(timer.elapsed_seconds(), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn begin_measures_from_now() {
        let (clock, mut timer) = timer();
        clock.advance_secs(4.0);
        timer.begin();
        clock.advance_secs(1.25);
        assert!((timer.elapsed_seconds() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn pause_freezes_and_unpause_excludes_paused_span() {
        let (clock, mut timer) = timer();
        timer.begin();
        clock.advance_secs(2.0);
        timer.pause();
        clock.advance_secs(7.0);
        assert!((timer.elapsed_seconds() - 2.0).abs() < 1e-9);

        timer.unpause();
        clock.advance_secs(0.5);
        assert!((timer.elapsed_seconds() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_pause_and_unpause_are_ignored() {
        let (clock, mut timer) = timer();
        timer.pause();
        assert!(!timer.is_paused());

        timer.begin();
        timer.unpause();
        assert!(timer.is_running());

        timer.pause();
        timer.pause();
        clock.advance_secs(1.0);
        timer.unpause();
        assert!(timer.is_running());
        assert!(timer.elapsed_seconds().abs() < 1e-9);
    }

    #[test]
    fn reset_stops_and_zeroes() {
        let (clock, mut timer) = timer();
        timer.begin();
        clock.advance_secs(3.0);
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_seconds(), 0.0);
    }

    #[test]
    fn derived_accessors_split_elapsed_time() {
        let (clock, mut timer) = timer();
        timer.begin();
        clock.advance_secs(125.25);
        assert_eq!(timer.minutes(), 2);
        assert_eq!(timer.seconds(), 5);
        assert!((timer.milliseconds() - 250.0).abs() < 1e-6);
    }

    #[test]
    fn observers_run_in_registration_order() {
        let (_clock, mut timer) = timer();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        timer.subscribe(move |event| first.borrow_mut().push((1, event)));
        let second = Rc::clone(&log);
        timer.subscribe(move |event| second.borrow_mut().push((2, event)));

        timer.begin();
        timer.pause();

        assert_eq!(
            *log.borrow(),
            vec![
                (1, TimerEvent::Reset),
                (2, TimerEvent::Reset),
                (1, TimerEvent::Start),
                (2, TimerEvent::Start),
                (1, TimerEvent::Pause),
                (2, TimerEvent::Pause),
            ]
        );
    }
}
