//! Soft failures reported while polling.

use crate::fetch::FetchError;
use thiserror::Error;

/// Why one poll attempt did not count as a success. These never abort the
/// poll; they are handed to the status and exception callbacks.
#[derive(Debug, Error)]
pub enum PollFailure {
    /// The server answered with an empty body.
    #[error("empty response [{code}]")]
    EmptyResponse { code: u32 },
    /// The server answered with a status outside 2xx/3xx.
    #[error("bad status code [{code}]")]
    BadStatus { code: u32 },
    /// The transport failed (timeout, refused, DNS, TLS, ...).
    #[error("request error [{0}]")]
    Request(#[source] FetchError),
    /// Anything else: an unusable URL, a failing headers callback.
    #[error("unexpected error [{0}]")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<FetchError> for PollFailure {
    fn from(e: FetchError) -> Self {
        if e.is_transport() {
            PollFailure::Request(e)
        } else {
            PollFailure::Unexpected(Box::new(e))
        }
    }
}

impl From<anyhow::Error> for PollFailure {
    fn from(e: anyhow::Error) -> Self {
        PollFailure::Unexpected(e.into())
    }
}
