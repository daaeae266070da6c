use crate::clock::non_negative_secs;
use std::time::Duration;

/// Decision returned by the retry policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// No attempts left; surface this failure.
    Stop,
    /// Try again right away (zero delay configured).
    RetryNow,
    /// Try again after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay manual retry policy.
///
/// `retries` extra attempts are made after the first, so a request is tried at
/// most `retries + 1` times. The delay is the same before every retry; a zero
/// delay retries immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first.
    pub retries: u32,
    /// Pause between attempts.
    pub sec_between: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            sec_between: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, sec_between: Duration) -> Self {
        Self {
            retries,
            sec_between,
        }
    }

    /// Build from a seconds value. Non-positive delays disable the pause.
    pub fn from_secs(retries: u32, sec_between: f64) -> Self {
        Self::new(retries, non_negative_secs(sec_between))
    }

    /// Maximum number of attempts (including the first). Always at least 1.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// What to do after attempt number `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts() {
            return RetryDecision::Stop;
        }
        if self.sec_between.is_zero() {
            RetryDecision::RetryNow
        } else {
            RetryDecision::RetryAfter(self.sec_between)
        }
    }
}
