//! `mdwait wait [url...]` – poll until a URL answers or the budget runs out.

use crate::cli::parse_header;
use anyhow::Result;
use clap::Args;
use mdwait_core::clock::{non_negative_secs, SystemClock};
use mdwait_core::config::MdwaitConfig;
use mdwait_core::poll::UrlWaiter;
use mdwait_core::transport::{CurlTransport, Headers};
use std::time::Duration;

#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Candidate URLs, tried in order each round (default: config `metadata_urls`).
    pub urls: Vec<String>,

    /// Overall budget in seconds; 0 tries each URL once (default from config).
    #[arg(long, value_name = "SECS")]
    pub max_wait: Option<f64>,

    /// Per-request timeout in seconds (default from config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Request header sent to every URL, `Name: value`. Repeatable.
    #[arg(long = "header", short = 'H', value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

impl WaitArgs {
    pub(crate) fn urls(&self, cfg: &MdwaitConfig) -> Vec<String> {
        if self.urls.is_empty() {
            cfg.metadata_urls.clone()
        } else {
            self.urls.clone()
        }
    }

    pub(crate) fn max_wait(&self, cfg: &MdwaitConfig) -> Option<Duration> {
        match self.max_wait {
            Some(secs) => Some(non_negative_secs(secs)).filter(|d| !d.is_zero()),
            None => cfg.max_wait(),
        }
    }

    pub(crate) fn timeout(&self, cfg: &MdwaitConfig) -> Option<Duration> {
        self.timeout.map(non_negative_secs).or_else(|| cfg.timeout())
    }
}

pub fn run_wait(cfg: &MdwaitConfig, args: WaitArgs) -> Result<()> {
    let urls = args.urls(cfg);
    if urls.is_empty() {
        anyhow::bail!("no urls to wait for (pass some or set metadata_urls in config)");
    }
    let max_wait = args.max_wait(cfg);
    let timeout = args.timeout(cfg);
    let headers: Headers = args.headers.iter().cloned().collect();
    tracing::info!(
        "wait urls={:?} max_wait={:?} timeout={:?}",
        urls,
        max_wait,
        timeout
    );

    let transport = CurlTransport::new();
    let clock = SystemClock;
    let found = UrlWaiter::new(&transport, &clock)
        .max_wait(max_wait)
        .timeout(timeout)
        .user_agent(cfg.user_agent())
        .with_headers(|_| Ok(headers.clone()))
        .on_status(|msg| {
            tracing::info!("{}", msg);
            eprintln!("{}", msg);
        })
        .wait(&urls);

    match found {
        Some(url) => {
            tracing::info!("using metadata url {}", url);
            println!("{}", url);
            Ok(())
        }
        None => match max_wait {
            Some(w) => anyhow::bail!("no url responded within {}s", w.as_secs_f64()),
            None => anyhow::bail!("no url responded"),
        },
    }
}
