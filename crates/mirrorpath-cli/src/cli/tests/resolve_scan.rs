//! Tests for resolve and scan subcommands.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_resolve_url_and_link_dir() {
    match parse(&[
        "mirrorpath",
        "resolve",
        "https://example.com/abc?v=1",
        "--link-dir",
        "/archive/1700000000.0",
    ]) {
        CliCommand::Resolve {
            url,
            link_dir,
            timestamp,
            downloaded_at,
            no_cache,
        } => {
            assert_eq!(url, "https://example.com/abc?v=1");
            assert_eq!(link_dir, Path::new("/archive/1700000000.0"));
            assert!(timestamp.is_none());
            assert!(downloaded_at.is_none());
            assert!(!no_cache);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_with_flags() {
    match parse(&[
        "mirrorpath",
        "resolve",
        "https://example.com/",
        "--link-dir",
        "/archive/1",
        "--timestamp",
        "1",
        "--downloaded-at",
        "1700000042.5",
        "--no-cache",
    ]) {
        CliCommand::Resolve {
            timestamp,
            downloaded_at,
            no_cache,
            ..
        } => {
            assert_eq!(timestamp.as_deref(), Some("1"));
            assert_eq!(downloaded_at, Some(1700000042.5));
            assert!(no_cache);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_scan_defaults() {
    match parse(&["mirrorpath", "scan", "/data/archive"]) {
        CliCommand::Scan {
            archive_dir,
            jobs,
            no_cache,
        } => {
            assert_eq!(archive_dir, Path::new("/data/archive"));
            assert!(jobs.is_none());
            assert!(!no_cache);
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_jobs() {
    match parse(&["mirrorpath", "scan", "/data/archive", "--jobs", "8", "--no-cache"]) {
        CliCommand::Scan { jobs, no_cache, .. } => {
            assert_eq!(jobs, Some(8));
            assert!(no_cache);
        }
        _ => panic!("expected Scan with --jobs"),
    }
}
