//! libcurl transport.
//!
//! One `Easy` handle per request, no connection reuse. Runs in the current
//! thread.

use super::{Headers, Method, PreparedRequest, RawResponse, Transport, TransportError, Verify};
use std::str;
use std::time::Duration;

/// Upper bound on redirects when `allow_redirects` is set.
const MAX_REDIRECTIONS: u32 = 10;

/// libcurl treats a zero timeout as "no timeout"; the smallest budget we pass is 1ms.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Largest millisecond count that fits a C `long` on every platform.
const MAX_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

#[derive(Debug, Default, Clone, Copy)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for CurlTransport {
    fn supports_tls(&self) -> bool {
        curl::Version::get().feature_ssl()
    }

    fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut body: Vec<u8> = Vec::new();
        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.follow_location(request.allow_redirects)?;
        if request.allow_redirects {
            easy.max_redirections(MAX_REDIRECTIONS)?;
        }
        if let Some(timeout) = request.timeout {
            let timeout = curl_timeout(timeout);
            easy.connect_timeout(timeout)?;
            easy.timeout(timeout)?;
        }

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                easy.post_fields_copy(request.body.as_deref().unwrap_or_default())?;
            }
        }

        if let Some(tls) = &request.tls {
            easy.ssl_verify_peer(true)?;
            easy.ssl_verify_host(true)?;
            if let Verify::CaBundle(path) = &tls.verify {
                easy.cainfo(path)?;
            }
            if let Some(identity) = &tls.identity {
                easy.ssl_cert(&identity.cert)?;
                easy.ssl_key(&identity.key)?;
            }
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(RawResponse {
            status,
            body,
            headers: parse_header_lines(&header_lines),
        })
    }
}

/// Clamp into the range libcurl accepts. Anything larger, `Duration::MAX`
/// included, would overflow the option and fail every transfer.
fn curl_timeout(timeout: Duration) -> Duration {
    timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT)
}

/// Collect `Name: value` lines into a map. A status line (`HTTP/...`) starts a
/// new response, so only the final response's headers survive a redirect chain.
fn parse_header_lines(lines: &[String]) -> Headers {
    let mut headers = Headers::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
    headers
}
