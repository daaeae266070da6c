use crate::transport::{Headers, RawResponse};

/// True for 2xx and 3xx.
pub fn is_success_status(code: u32) -> bool {
    (200..400).contains(&code)
}

/// A successful attempt's answer. Read-only once built.
#[derive(Debug, Clone)]
pub struct Response {
    status: u32,
    body: Vec<u8>,
    headers: Headers,
    tls_degraded: bool,
}

impl Response {
    pub(crate) fn from_raw(raw: RawResponse, tls_degraded: bool) -> Self {
        Self {
            status: raw.status,
            body: raw.body,
            headers: raw.headers,
            tls_degraded,
        }
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True when the request asked for https verification the transport
    /// could not provide.
    pub fn tls_degraded(&self) -> bool {
        self.tls_degraded
    }

    pub fn ok(&self) -> bool {
        is_success_status(self.status)
    }
}
