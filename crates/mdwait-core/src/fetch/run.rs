//! Retry loop: run a closure until success or the policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use crate::clock::Clock;

/// Runs `f` (given the 1-based attempt number) until it succeeds or the policy
/// runs out of attempts. Sleeps through `clock` between attempts when the
/// policy asks for a delay. On exhaustion the error from the final attempt is
/// returned; earlier errors are dropped.
pub fn run_with_retry<T, E, F>(policy: &RetryPolicy, clock: &dyn Clock, mut f: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt) {
                RetryDecision::Stop => return Err(e),
                RetryDecision::RetryNow => attempt += 1,
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(
                        "Please wait {:.3} seconds while we wait to try again",
                        d.as_secs_f64()
                    );
                    clock.sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
