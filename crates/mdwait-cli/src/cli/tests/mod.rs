//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}


#[test]
fn cli_parse_completions() {
    match parse(&["mdwait", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = Cli::try_parse_from(["mdwait", "wait", "--config", "/tmp/c.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
}

#[test]
fn parse_header_accepts_name_value() {
    assert_eq!(
        super::parse_header("X-Token:  abc:def ").unwrap(),
        ("X-Token".to_string(), "abc:def".to_string())
    );
    assert!(super::parse_header("no-colon").is_err());
    assert!(super::parse_header(": v").is_err());
}

#[test]
fn cli_verify_structure() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
