//! Poller: try a list of candidate URLs until one answers usably or the
//! global deadline passes.
//!
//! Built for waiting on instance metadata services, which may come up after
//! the instance does, may be painfully slow, or may be firewalled off
//! entirely. Each round tries every URL once; rounds are separated by a sleep
//! that grows every five rounds; per-request timeouts are cut down so the
//! poll does not run far past `max_wait`. Reachability problems never escape
//! as errors: they are reported through callbacks and the poll carries on.

mod failure;
mod state;

pub use failure::PollFailure;
pub use state::{sleep_interval, PollState};

use crate::clock::{Clock, SystemClock};
use crate::fetch::{read_url, RequestSpec, RetryPolicy};
use crate::transport::{Headers, Transport};
use std::time::Duration;

type StatusCallback<'a> = Box<dyn FnMut(&str) + 'a>;
type HeadersCallback<'a> = Box<dyn FnMut(&str) -> anyhow::Result<Headers> + 'a>;
type ExceptionCallback<'a> = Box<dyn FnMut(&str, &PollFailure) + 'a>;

/// Builder and runner for one poll over a list of URLs.
///
/// ```no_run
/// use mdwait_core::clock::SystemClock;
/// use mdwait_core::poll::UrlWaiter;
/// use mdwait_core::transport::CurlTransport;
/// use std::time::Duration;
///
/// let transport = CurlTransport::new();
/// let clock = SystemClock;
/// let found = UrlWaiter::new(&transport, &clock)
///     .max_wait(Some(Duration::from_secs(120)))
///     .timeout(Some(Duration::from_secs(50)))
///     .on_status(|msg| eprintln!("{msg}"))
///     .wait(&["http://169.254.169.254/latest/meta-data/instance-id"]);
/// ```
pub struct UrlWaiter<'a> {
    transport: &'a dyn Transport,
    clock: &'a dyn Clock,
    max_wait: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    status_cb: Option<StatusCallback<'a>>,
    headers_cb: Option<HeadersCallback<'a>>,
    exception_cb: Option<ExceptionCallback<'a>>,
}

impl<'a> UrlWaiter<'a> {
    pub fn new(transport: &'a dyn Transport, clock: &'a dyn Clock) -> Self {
        Self {
            transport,
            clock,
            max_wait: None,
            timeout: None,
            user_agent: None,
            status_cb: None,
            headers_cb: None,
            exception_cb: None,
        }
    }

    /// Overall budget. `None` or zero means a single round.
    pub fn max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Per-request timeout before any deadline shrinking.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the default `User-Agent` used when no headers are supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Called with a message after every failed attempt. Defaults to a debug log line.
    pub fn on_status(mut self, cb: impl FnMut(&str) + 'a) -> Self {
        self.status_cb = Some(Box::new(cb));
        self
    }

    /// Called with each URL to get that attempt's headers. Defaults to none.
    pub fn with_headers(mut self, cb: impl FnMut(&str) -> anyhow::Result<Headers> + 'a) -> Self {
        self.headers_cb = Some(Box::new(cb));
        self
    }

    /// Called with the status message and the failure after every failed attempt.
    pub fn on_exception(mut self, cb: impl FnMut(&str, &PollFailure) + 'a) -> Self {
        self.exception_cb = Some(Box::new(cb));
        self
    }

    /// Poll `urls` in order, once per round. Returns the first URL that gave a
    /// non-empty body with a success status, or `None` once the budget is
    /// spent.
    pub fn wait<S: AsRef<str>>(&mut self, urls: &[S]) -> Option<String> {
        let mut state = PollState::new(self.clock.now(), self.max_wait);

        loop {
            for url in urls {
                let url = url.as_ref();
                let now = self.clock.now();
                if state.round() > 0 && state.timed_out(now) {
                    break;
                }
                let timeout = state.effective_timeout(now, self.timeout);

                match self.try_url(url, timeout) {
                    Ok(()) => {
                        tracing::debug!(
                            "'{}' answered after {}s (round {})",
                            url,
                            state.elapsed(self.clock.now()).as_secs(),
                            state.round()
                        );
                        return Some(url.to_string());
                    }
                    Err(failure) => self.report(url, &state, &failure),
                }
            }

            if state.timed_out(self.clock.now()) {
                break;
            }

            let sleep = state.next_round();
            tracing::debug!(
                "Please wait {} seconds while we wait to try again",
                sleep.as_secs()
            );
            self.clock.sleep(sleep);
        }

        None
    }

    /// One attempt against `url`. Status checking is left off in the fetcher;
    /// body and status are judged here so a bad status is a soft failure.
    fn try_url(&mut self, url: &str, timeout: Option<Duration>) -> Result<(), PollFailure> {
        let headers = match self.headers_cb.as_mut() {
            Some(cb) => cb(url)?,
            None => Headers::new(),
        };

        let mut spec = RequestSpec::new(url)
            .with_headers(headers)
            .with_timeout(timeout)
            .with_check_status(false);
        if let Some(ua) = &self.user_agent {
            spec = spec.with_user_agent(ua.clone());
        }

        let response = read_url(self.transport, self.clock, &spec, &RetryPolicy::default())?;
        if response.body().is_empty() {
            Err(PollFailure::EmptyResponse {
                code: response.status(),
            })
        } else if !response.ok() {
            Err(PollFailure::BadStatus {
                code: response.status(),
            })
        } else {
            Ok(())
        }
    }

    fn report(&mut self, url: &str, state: &PollState, failure: &PollFailure) {
        let budget = match state.max_wait() {
            Some(w) => format!("{}s", w.as_secs_f64()),
            None => "unbounded".to_string(),
        };
        let msg = format!(
            "Calling '{}' failed [{}/{}]: {}",
            url,
            state.elapsed(self.clock.now()).as_secs(),
            budget,
            failure
        );
        match self.status_cb.as_mut() {
            Some(cb) => cb(&msg),
            None => tracing::debug!("{}", msg),
        }
        if let Some(cb) = self.exception_cb.as_mut() {
            cb(&msg, failure);
        }
    }
}

/// Poll `urls` with the system clock and no callbacks.
pub fn wait_for_url<S: AsRef<str>>(
    transport: &dyn Transport,
    urls: &[S],
    max_wait: Option<Duration>,
    timeout: Option<Duration>,
) -> Option<String> {
    let clock = SystemClock;
    let found = UrlWaiter::new(transport, &clock)
        .max_wait(max_wait)
        .timeout(timeout)
        .wait(urls);
    found
}
