//! `mirrorpath resolve <url> --link-dir DIR` – resolve one snapshot.

use anyhow::{Context, Result};
use mirrorpath_core::cache::{CacheDb, CacheKey, MemoryCache};
use mirrorpath_core::config::ResolverConfig;
use mirrorpath_core::resolver::PathResolver;
use mirrorpath_core::snapshot::Snapshot;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the snapshot to resolve. The timestamp defaults to the snapshot
/// directory's name, which is how archives name them.
pub fn snapshot_from_args(
    url: String,
    link_dir: PathBuf,
    timestamp: Option<String>,
    downloaded_at: Option<f64>,
) -> Snapshot {
    let timestamp = timestamp.unwrap_or_else(|| {
        link_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Snapshot::new(url, link_dir, timestamp).with_downloaded_at(downloaded_at)
}

pub async fn run_resolve(
    db: &CacheDb,
    cfg: &ResolverConfig,
    snapshot: Snapshot,
    use_cache: bool,
) -> Result<()> {
    let cache = Arc::new(MemoryCache::new());
    if use_cache {
        let key = CacheKey::for_snapshot(&snapshot).to_string_key();
        db.preload(&cache, &key).await?;
    }

    let url = snapshot.url.clone();
    let resolver = PathResolver::new(cfg.clone(), cache.clone());
    let resolution = tokio::task::spawn_blocking(move || {
        resolver.resolve_with_source(&snapshot, use_cache)
    })
    .await
    .context("resolve task join")?;

    if use_cache {
        db.flush(&cache).await?;
    }

    match resolution {
        Some(r) => {
            tracing::debug!(url = %url, source = ?r.source, "resolved {}", r.path);
            println!("{}", r.path);
            Ok(())
        }
        None => anyhow::bail!("no output found for {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_defaults_to_dir_name() {
        let snap = snapshot_from_args(
            "https://example.com".to_string(),
            PathBuf::from("/archive/1700000000.0"),
            None,
            None,
        );
        assert_eq!(snap.timestamp, "1700000000.0");
        assert_eq!(snap.url, "https://example.com");
        assert!(snap.downloaded_at.is_none());
    }

    #[test]
    fn flags_set_timestamp_and_completion_time() {
        let snap = snapshot_from_args(
            "https://example.com/a".to_string(),
            PathBuf::from("/archive/5"),
            Some("7".to_string()),
            Some(6.0),
        );
        assert_eq!(snap.timestamp, "7");
        assert_eq!(snap.downloaded_at, Some(6.0));
    }

    #[tokio::test]
    async fn run_resolve_reports_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cache.db");
        let db = CacheDb::open_at(&db_path).await.unwrap();
        let snap = snapshot_from_args(
            "https://example.com/".to_string(),
            dir.path().join("snap"),
            None,
            None,
        );
        let err = run_resolve(&db, &ResolverConfig::default(), snap, true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no output found"));
    }
}
