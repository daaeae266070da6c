//! Transport seam: one fully-resolved HTTP request in, one raw response out.
//!
//! The fetcher only configures and consumes a [`Transport`]; sockets, TLS and
//! redirect following live behind it. [`CurlTransport`] is the libcurl-backed
//! implementation used outside tests.

mod libcurl;
mod error;

pub use libcurl::CurlTransport;
pub use error::TransportError;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Request/response header map. Names are kept as given.
pub type Headers = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// How the server certificate is verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verify {
    /// System trust store.
    System,
    /// A specific CA bundle file.
    CaBundle(PathBuf),
}

/// Client certificate and key for mutual TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsSettings {
    pub verify: Verify,
    pub identity: Option<ClientIdentity>,
}

/// A request with every decision already made (URL cleaned, method chosen,
/// default headers injected, TLS resolved).
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    /// Only present for `Method::Post`.
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
    pub tls: Option<TlsSettings>,
    /// Set when https was asked for with SSL details but the transport can't
    /// verify; the request goes out without TLS settings.
    pub tls_degraded: bool,
    pub allow_redirects: bool,
}

impl PreparedRequest {
    /// One-line description for logs. Leaves out the body, which may be large.
    pub fn summary(&self) -> String {
        format!(
            "{{method: {}, headers: {:?}, timeout: {:?}, allow_redirects: {}, tls: {:?}, tls_degraded: {}}}",
            self.method.as_str(),
            self.headers,
            self.timeout,
            self.allow_redirects,
            self.tls,
            self.tls_degraded
        )
    }
}

/// What the transport hands back for any HTTP answer, whatever the status.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u32,
    pub body: Vec<u8>,
    pub headers: Headers,
}

/// Performs a single HTTP exchange. Implementations must not retry.
pub trait Transport {
    /// Whether TLS verification and client certificates can be honoured.
    fn supports_tls(&self) -> bool;

    fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}
