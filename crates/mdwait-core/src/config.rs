use crate::clock::non_negative_secs;
use crate::fetch::{RetryPolicy, SslDetails};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Extra attempts after the first.
    pub retries: u32,
    /// Pause between attempts in seconds (0 or negative = retry immediately).
    pub sec_between_secs: f64,
    /// Follow HTTP redirects.
    #[serde(default)]
    pub allow_redirects: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: 0,
            sec_between_secs: 1.0,
            allow_redirects: false,
        }
    }
}

/// TLS material for https URLs (optional `[ssl]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslConfig {
    #[serde(default)]
    pub ca_certs: Option<PathBuf>,
    #[serde(default)]
    pub cert_file: Option<PathBuf>,
    #[serde(default)]
    pub key_file: Option<PathBuf>,
}

/// Global configuration loaded from `~/.config/mdwait/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdwaitConfig {
    /// Overall budget for `mdwait wait`, in seconds. 0 = a single round.
    pub max_wait_secs: f64,
    /// Per-request timeout in seconds (None = no timeout).
    #[serde(default)]
    pub timeout_secs: Option<f64>,
    /// URLs polled by `mdwait wait` when none are given on the command line.
    #[serde(default = "default_metadata_urls")]
    pub metadata_urls: Vec<String>,
    /// Replaces the default `Mdwait/<version>` user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional fetch/retry settings; built-in defaults when missing.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
    /// Optional TLS settings for https URLs.
    #[serde(default)]
    pub ssl: Option<SslConfig>,
}

fn default_metadata_urls() -> Vec<String> {
    vec!["http://169.254.169.254/".to_string()]
}

impl Default for MdwaitConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: 120.0,
            timeout_secs: Some(50.0),
            metadata_urls: default_metadata_urls(),
            user_agent: None,
            fetch: None,
            ssl: None,
        }
    }
}

impl MdwaitConfig {
    /// `None` when the budget is zero or negative (single round).
    pub fn max_wait(&self) -> Option<Duration> {
        Some(non_negative_secs(self.max_wait_secs)).filter(|d| !d.is_zero())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(non_negative_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let fetch = self.fetch.clone().unwrap_or_default();
        RetryPolicy::from_secs(fetch.retries, fetch.sec_between_secs)
    }

    pub fn allow_redirects(&self) -> bool {
        self.fetch.as_ref().is_some_and(|f| f.allow_redirects)
    }

    pub fn ssl_details(&self) -> Option<SslDetails> {
        self.ssl.as_ref().map(|s| SslDetails {
            ca_certs: s.ca_certs.clone(),
            cert_file: s.cert_file.clone(),
            key_file: s.key_file.clone(),
        })
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(crate::version::user_agent)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdwait")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdwaitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MdwaitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<MdwaitConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: MdwaitConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
