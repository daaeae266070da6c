//! Fetcher: one logical HTTP request with bounded manual retries.
//!
//! The retry loop is ours, not the transport's: every attempt is a fresh
//! transport call, a fixed delay separates attempts, and only the final
//! attempt's error is reported.

mod error;
mod policy;
mod prepare;
mod response;
mod run;

pub use error::FetchError;
pub use policy::{RetryDecision, RetryPolicy};
pub use response::{is_success_status, Response};
pub use run::run_with_retry;

use crate::clock::{non_negative_secs, Clock};
use crate::transport::{Headers, Method, PreparedRequest, Transport};
use std::path::PathBuf;
use std::time::Duration;

/// TLS material for `https` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslDetails {
    /// CA bundle to verify against. System trust when absent or empty.
    pub ca_certs: Option<PathBuf>,
    /// Client certificate; used only together with `key_file`.
    pub cert_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
}

/// What to fetch and how. A value object; `read_url` never modifies it.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    /// Request body. A non-empty body turns the request into a POST.
    pub body: Option<Vec<u8>>,
    /// Headers to send. When empty, a default `User-Agent` is sent instead.
    pub headers: Headers,
    pub timeout: Option<Duration>,
    pub ssl: Option<SslDetails>,
    pub allow_redirects: bool,
    /// Treat a status outside 2xx/3xx as a failed attempt.
    pub check_status: bool,
    /// Value for the default `User-Agent` header.
    pub user_agent: String,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
            headers: Headers::new(),
            timeout: None,
            ssl: None,
            allow_redirects: false,
            check_status: true,
            user_agent: crate::version::user_agent(),
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout in seconds; negative values are clamped to zero.
    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.timeout = Some(non_negative_secs(secs));
        self
    }

    pub fn with_ssl(mut self, ssl: SslDetails) -> Self {
        self.ssl = Some(ssl);
        self
    }

    pub fn with_allow_redirects(mut self, allow: bool) -> Self {
        self.allow_redirects = allow;
        self
    }

    pub fn with_check_status(mut self, check: bool) -> Self {
        self.check_status = check;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn method(&self) -> Method {
        match &self.body {
            Some(body) if !body.is_empty() => Method::Post,
            _ => Method::Get,
        }
    }
}

/// Fetch `spec.url`, retrying transport failures (and bad statuses when
/// `check_status` is set) according to `policy`.
///
/// Returns on the first usable response. When every attempt fails, the error
/// from the last attempt is returned. Blocks the calling thread for the
/// network calls and the inter-attempt sleeps.
pub fn read_url(
    transport: &dyn Transport,
    clock: &dyn Clock,
    spec: &RequestSpec,
    policy: &RetryPolicy,
) -> Result<Response, FetchError> {
    let request = prepare::prepare(spec, transport)?;
    tracing::debug!(
        "Attempting to open '{}' with {} configuration",
        request.url,
        request.summary()
    );

    run_with_retry(policy, clock, |attempt| {
        let response = attempt_once(transport, &request, spec.check_status)?;
        tracing::debug!(
            "Read from {} ({}, {}b) after {} attempts",
            request.url,
            response.status(),
            response.body().len(),
            attempt
        );
        Ok(response)
    })
}

fn attempt_once(
    transport: &dyn Transport,
    request: &PreparedRequest,
    check_status: bool,
) -> Result<Response, FetchError> {
    let raw = transport.send(request).map_err(|source| {
        tracing::debug!(
            timed_out = source.is_timeout(),
            "request to {} failed: {}",
            request.url,
            source
        );
        FetchError::Transport {
            url: request.url.clone(),
            source,
        }
    })?;
    let response = Response::from_raw(raw, request.tls_degraded);
    if check_status && !response.ok() {
        tracing::debug!("{} returned HTTP {}", request.url, response.status());
        return Err(FetchError::Status {
            url: request.url.clone(),
            code: response.status(),
        });
    }
    Ok(response)
}
