//! `mirrorpath scan <archive_dir>` – resolve every snapshot in an archive.
//!
//! Keeps up to `jobs` resolutions in flight on the blocking pool; each one may
//! stall on slow storage, so they run independently and share only the cache.

use anyhow::Result;
use mirrorpath_core::cache::{CacheDb, MemoryCache};
use mirrorpath_core::config::ResolverConfig;
use mirrorpath_core::resolver::{PathResolver, Resolution};
use mirrorpath_core::snapshot::{discover_snapshots, Snapshot};
use std::path::Path;
use std::sync::Arc;

pub async fn run_scan(
    db: &CacheDb,
    cfg: &ResolverConfig,
    archive_dir: &Path,
    jobs: usize,
    use_cache: bool,
) -> Result<()> {
    let snapshots = discover_snapshots(archive_dir)?;
    let cache = Arc::new(MemoryCache::new());
    if use_cache {
        db.load_into(&cache).await?;
    }

    let resolver = Arc::new(PathResolver::new(cfg.clone(), cache.clone()));
    let results = resolve_all(resolver, snapshots, jobs, use_cache).await?;

    let mut found = 0usize;
    for (snapshot, resolution) in &results {
        match resolution {
            Some(r) => {
                found += 1;
                println!("{}\t{}", snapshot.timestamp, r.path);
            }
            None => println!("{}\t-", snapshot.timestamp),
        }
    }
    tracing::info!(
        archive = %archive_dir.display(),
        "resolved {} of {} snapshot(s)",
        found,
        results.len()
    );

    if use_cache {
        db.flush(&cache).await?;
    }
    Ok(())
}

/// Resolves `snapshots` with at most `jobs` in flight. Results keep input order.
pub(crate) async fn resolve_all(
    resolver: Arc<PathResolver>,
    snapshots: Vec<Snapshot>,
    jobs: usize,
    use_cache: bool,
) -> Result<Vec<(Snapshot, Option<Resolution>)>> {
    let max_concurrent = jobs.max(1);
    let mut results: Vec<Option<(Snapshot, Option<Resolution>)>> = vec![None; snapshots.len()];
    let mut pending = snapshots.into_iter().enumerate();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((index, snapshot)) = pending.next() else {
                break;
            };
            let resolver = Arc::clone(&resolver);
            join_set.spawn_blocking(move || {
                let resolution = resolver.resolve_with_source(&snapshot, use_cache);
                (index, snapshot, resolution)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (index, snapshot, resolution) =
            res.map_err(|e| anyhow::anyhow!("resolve task join: {}", e))?;
        results[index] = Some((snapshot, resolution));
    }

    Ok(results.into_iter().flatten().collect())
}
