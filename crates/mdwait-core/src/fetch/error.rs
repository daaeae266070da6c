//! Fetch error type.

use crate::transport::TransportError;
use thiserror::Error;

/// Why a fetch produced no usable response. Only the last attempt's error is
/// ever returned.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed even after cleaning.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The transport failed before an HTTP response was obtained.
    #[error("{source} (url: {url})")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    /// A response arrived but its status is outside the success range and the
    /// request asked for status checking.
    #[error("{code} error for url: {url}")]
    Status { url: String, code: u32 },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// HTTP status for `Status` errors.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
