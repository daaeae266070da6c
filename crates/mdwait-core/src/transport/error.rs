//! Transport-level failure (no usable HTTP response was obtained).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (timeout, connection refused, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Any other transport failure, described in text.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(msg: impl Into<String>) -> Self {
        TransportError::Other(msg.into())
    }

    /// True when the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Curl(e) => e.is_operation_timedout(),
            TransportError::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_never_a_timeout() {
        let e = TransportError::other("connection reset");
        assert!(!e.is_timeout());
        assert_eq!(e.to_string(), "connection reset");
    }
}
