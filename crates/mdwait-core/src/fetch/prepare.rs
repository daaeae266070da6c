//! Turn a caller's `RequestSpec` into the transport's `PreparedRequest`.

use super::{FetchError, RequestSpec, SslDetails};
use crate::transport::{
    ClientIdentity, Headers, Method, PreparedRequest, TlsSettings, Transport, Verify,
};
use crate::url_clean::clean_url;

/// Resolve URL, TLS, method and headers. Never touches `spec`.
pub(crate) fn prepare(
    spec: &RequestSpec,
    transport: &dyn Transport,
) -> Result<PreparedRequest, FetchError> {
    let parsed = url::Url::parse(&clean_url(&spec.url)).map_err(|e| FetchError::InvalidUrl {
        url: spec.url.clone(),
        reason: e.to_string(),
    })?;

    let (tls, tls_degraded) = match &spec.ssl {
        Some(ssl) if parsed.scheme() == "https" => {
            if transport.supports_tls() {
                (Some(tls_settings(ssl)), false)
            } else {
                tracing::warn!("SSL is not enabled, cert. verification can not occur!");
                (None, true)
            }
        }
        _ => (None, false),
    };

    let method = spec.method();
    let body = match method {
        Method::Post => spec.body.clone(),
        Method::Get => None,
    };

    Ok(PreparedRequest {
        url: String::from(parsed),
        method,
        headers: request_headers(spec),
        body,
        timeout: spec.timeout,
        tls,
        tls_degraded,
        allow_redirects: spec.allow_redirects,
    })
}

/// Caller headers, or a fresh default set when none were given.
fn request_headers(spec: &RequestSpec) -> Headers {
    if spec.headers.is_empty() {
        let mut headers = Headers::new();
        headers.insert("User-Agent".to_string(), spec.user_agent.clone());
        headers
    } else {
        spec.headers.clone()
    }
}

fn tls_settings(ssl: &SslDetails) -> TlsSettings {
    let verify = match &ssl.ca_certs {
        Some(path) if !path.as_os_str().is_empty() => Verify::CaBundle(path.clone()),
        _ => Verify::System,
    };
    let identity = match (&ssl.cert_file, &ssl.key_file) {
        (Some(cert), Some(key)) => Some(ClientIdentity {
            cert: cert.clone(),
            key: key.clone(),
        }),
        _ => None,
    };
    TlsSettings { verify, identity }
}
