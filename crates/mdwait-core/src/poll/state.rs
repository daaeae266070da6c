//! Deadline and back-off bookkeeping for one poll.

use std::time::{Duration, Instant};

/// Sleep after round `round` (0-based): one second, plus one more for every
/// five completed rounds.
pub fn sleep_interval(round: u32) -> Duration {
    Duration::from_secs(u64::from(round / 5) + 1)
}

/// State of a single `UrlWaiter::wait` call. The start instant is captured
/// once and the deadline is never reset.
#[derive(Debug, Clone, Copy)]
pub struct PollState {
    start: Instant,
    max_wait: Option<Duration>,
    round: u32,
}

impl PollState {
    pub fn new(start: Instant, max_wait: Option<Duration>) -> Self {
        Self {
            start,
            max_wait,
            round: 0,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    /// `start + max_wait`, if a non-zero budget was given.
    pub fn deadline(&self) -> Option<Instant> {
        self.max_wait
            .filter(|w| !w.is_zero())
            .and_then(|w| self.start.checked_add(w))
    }

    /// True once the budget is spent. Without a budget (or with a zero one)
    /// this is always true, so exactly one round runs.
    pub fn timed_out(&self, now: Instant) -> bool {
        match self.max_wait {
            None => true,
            Some(w) if w.is_zero() => true,
            Some(w) => self.elapsed(now) > w,
        }
    }

    /// Timeout to use for a request issued at `now`.
    ///
    /// Round 0 always uses `configured`. Later rounds cut it down to exactly
    /// `deadline - now` when the full timeout would run past the deadline.
    pub fn effective_timeout(&self, now: Instant, configured: Option<Duration>) -> Option<Duration> {
        if self.round == 0 {
            return configured;
        }
        let (Some(timeout), Some(deadline)) = (configured, self.deadline()) else {
            return configured;
        };
        let overruns = now.checked_add(timeout).map_or(true, |end| end > deadline);
        if overruns {
            Some(deadline.saturating_duration_since(now))
        } else {
            Some(timeout)
        }
    }

    /// Finish the current round: returns how long to sleep and advances the
    /// round counter.
    pub fn next_round(&mut self) -> Duration {
        let sleep = sleep_interval(self.round);
        self.round = self.round.saturating_add(1);
        sleep
    }
}
