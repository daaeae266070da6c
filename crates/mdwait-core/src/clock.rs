//! Wall-clock reads and blocking sleeps.
//!
//! The fetch retry loop and the poller never call `Instant::now` or
//! `thread::sleep` directly; they go through [`Clock`] so deadline arithmetic
//! can be driven by a [`ManualClock`] in tests.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Source of time and a way to block the current thread.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Real clock: `Instant::now` and `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to. `sleep` records the duration and
/// advances time by it instead of blocking.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
    sleeps: RefCell<Vec<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    /// Move time forward without recording a sleep (e.g. simulated request latency).
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

/// Convert a seconds value from config or CLI into a `Duration`.
///
/// Negative and NaN inputs become zero; values too large for `Duration`
/// saturate.
pub fn non_negative_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
