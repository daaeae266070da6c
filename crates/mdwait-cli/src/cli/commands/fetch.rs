//! `mdwait fetch <url>` – one request with manual retries.

use crate::cli::parse_header;
use anyhow::{Context, Result};
use clap::Args;
use mdwait_core::clock::{non_negative_secs, SystemClock};
use mdwait_core::config::MdwaitConfig;
use mdwait_core::fetch::{read_url, RequestSpec, RetryPolicy, SslDetails};
use mdwait_core::transport::CurlTransport;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// URL to fetch. A bare host such as `www.example.com` means http.
    pub url: String,

    /// Request body; its presence turns the request into a POST.
    #[arg(long, value_name = "DATA")]
    pub data: Option<String>,

    /// Per-attempt timeout in seconds (default from config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Extra attempts after the first (default from config).
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Seconds to sleep between attempts; 0 or less retries immediately.
    #[arg(long, value_name = "SECS", allow_hyphen_values = true)]
    pub sec_between: Option<f64>,

    /// Return the response even when the status is not 2xx/3xx.
    #[arg(long)]
    pub no_check_status: bool,

    /// Follow redirects.
    #[arg(long)]
    pub allow_redirects: bool,

    /// Extra request header, `Name: value`. Repeatable; replaces the default User-Agent.
    #[arg(long = "header", short = 'H', value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// CA bundle for https verification.
    #[arg(long, value_name = "PATH")]
    pub ca_certs: Option<PathBuf>,

    /// Client certificate for https (needs --key-file).
    #[arg(long, value_name = "PATH")]
    pub cert_file: Option<PathBuf>,

    /// Client private key for https.
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<PathBuf>,
}

impl FetchArgs {
    fn ssl_details(&self, cfg: &MdwaitConfig) -> Option<SslDetails> {
        let from_flags = self.ca_certs.is_some() || self.cert_file.is_some() || self.key_file.is_some();
        if !from_flags {
            return cfg.ssl_details();
        }
        Some(SslDetails {
            ca_certs: self.ca_certs.clone(),
            cert_file: self.cert_file.clone(),
            key_file: self.key_file.clone(),
        })
    }

    pub(crate) fn retry_policy(&self, cfg: &MdwaitConfig) -> RetryPolicy {
        let base = cfg.retry_policy();
        RetryPolicy::new(
            self.retries.unwrap_or(base.retries),
            self.sec_between.map(non_negative_secs).unwrap_or(base.sec_between),
        )
    }

    /// Combine flags with config defaults into a request.
    pub(crate) fn request_spec(&self, cfg: &MdwaitConfig) -> RequestSpec {
        let mut spec = RequestSpec::new(self.url.clone())
            .with_timeout(self.timeout.map(non_negative_secs).or_else(|| cfg.timeout()))
            .with_allow_redirects(self.allow_redirects || cfg.allow_redirects())
            .with_check_status(!self.no_check_status)
            .with_user_agent(cfg.user_agent());
        if let Some(data) = &self.data {
            spec = spec.with_body(data.clone().into_bytes());
        }
        for (name, value) in &self.headers {
            spec = spec.with_header(name.clone(), value.clone());
        }
        if let Some(ssl) = self.ssl_details(cfg) {
            spec = spec.with_ssl(ssl);
        }
        spec
    }
}

pub fn run_fetch(cfg: &MdwaitConfig, args: FetchArgs) -> Result<()> {
    let spec = args.request_spec(cfg);
    let policy = args.retry_policy(cfg);
    tracing::info!(
        "fetch url={} retries={} sec_between={:?}",
        spec.url,
        policy.retries,
        policy.sec_between
    );

    let response = read_url(&CurlTransport::new(), &SystemClock, &spec, &policy)
        .with_context(|| format!("fetch {}", spec.url))?;

    if response.tls_degraded() {
        eprintln!("warning: libcurl has no TLS support, certificate was not verified");
    }
    eprintln!(
        "HTTP {} ({} bytes, {})",
        response.status(),
        response.body().len(),
        response.header("content-type").unwrap_or("no content-type")
    );
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.body()).context("write response body")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
