//! `mirrorpath cache stats|clear` – inspect the persistent cache.

use anyhow::Result;
use mirrorpath_core::cache::CacheDb;

pub async fn run_cache_stats(db: &CacheDb) -> Result<()> {
    let n = db.count().await?;
    println!("{n} cached resolution(s)");
    Ok(())
}

pub async fn run_cache_clear(db: &CacheDb) -> Result<()> {
    let removed = db.clear().await?;
    tracing::info!("cleared {} cached resolution(s)", removed);
    println!("Removed {removed} cached resolution(s)");
    Ok(())
}
