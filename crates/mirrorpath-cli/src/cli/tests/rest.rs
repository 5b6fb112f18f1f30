//! Tests for cache, completions and man subcommands.

use super::parse;
use crate::cli::{CacheAction, Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_cache_stats() {
    match parse(&["mirrorpath", "cache", "stats"]) {
        CliCommand::Cache {
            action: CacheAction::Stats,
        } => {}
        _ => panic!("expected Cache Stats"),
    }
}

#[test]
fn cli_parse_cache_clear() {
    match parse(&["mirrorpath", "cache", "clear"]) {
        CliCommand::Cache {
            action: CacheAction::Clear,
        } => {}
        _ => panic!("expected Cache Clear"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["mirrorpath", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["mirrorpath", "man"]), CliCommand::Man));
}

#[test]
fn cli_rejects_missing_link_dir() {
    assert!(Cli::try_parse_from(["mirrorpath", "resolve", "https://example.com/"]).is_err());
}

#[test]
fn cli_rejects_missing_url() {
    assert!(Cli::try_parse_from(["mirrorpath", "resolve", "--link-dir", "/archive/1"]).is_err());
}
