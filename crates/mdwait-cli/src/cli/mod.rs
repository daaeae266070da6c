//! CLI for mdwait.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mdwait_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_wait, FetchArgs, WaitArgs};

/// Top-level CLI for mdwait.
#[derive(Debug, Parser)]
#[command(name = "mdwait", version = mdwait_core::version::VERSION)]
#[command(about = "mdwait: fetch a URL with retries, or wait for a metadata service to answer", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/mdwait/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch one URL (GET, or POST with --data) and print the response body.
    Fetch(FetchArgs),

    /// Poll URLs until one returns a non-empty success response.
    Wait(WaitArgs),

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Parse a `Name: value` header argument.
pub(crate) fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{}'", s));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need no config.
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(&cfg, args)?,
            CliCommand::Wait(args) => run_wait(&cfg, args)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
