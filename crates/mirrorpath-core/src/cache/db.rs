//! SQLite-backed persistence for the resolution cache.
//!
//! The resolver itself only talks to a [`MemoryCache`]; this store loads
//! entries into it before a run and flushes newly written entries afterwards.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::MemoryCache;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the persistent cache database.
///
/// Stored under the XDG state directory by default:
/// `~/.local/state/mirrorpath/cache.db`.
#[derive(Clone)]
pub struct CacheDb {
    pool: Pool<Sqlite>,
}

impl CacheDb {
    /// Open (or create) the default cache database.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("mirrorpath")?;
        let db_path = xdg_dirs
            .place_state_file("cache.db")
            .context("create state dir for cache db")?;
        Self::open_at(db_path).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await
            .with_context(|| format!("open cache db: {}", path.display()))?;
        let db = CacheDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resolution_cache (
                cache_key TEXT PRIMARY KEY NOT NULL,
                cache_value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look up a single persisted entry.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT cache_value FROM resolution_cache WHERE cache_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    /// Copy one persisted entry into `cache`, if present. Returns whether it was found.
    pub async fn preload(&self, cache: &MemoryCache, key: &str) -> Result<bool> {
        match self.get(key).await? {
            Some(value) => {
                cache.insert_clean(key.to_string(), value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Copy every persisted entry into `cache`. Returns the number loaded.
    pub async fn load_into(&self, cache: &MemoryCache) -> Result<usize> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT cache_key, cache_value FROM resolution_cache",
        )
        .fetch_all(&self.pool)
        .await?;
        let n = rows.len();
        for (key, value) in rows {
            cache.insert_clean(key, value);
        }
        tracing::info!("loaded {} cached resolution(s)", n);
        Ok(n)
    }

    /// Persist entries written to `cache` since the last flush. Last write wins.
    pub async fn flush(&self, cache: &MemoryCache) -> Result<usize> {
        let dirty = cache.take_dirty();
        if dirty.is_empty() {
            return Ok(0);
        }
        let now = unix_timestamp();
        let mut tx = self.pool.begin().await?;
        for (key, value) in &dirty {
            sqlx::query(
                r#"
                INSERT INTO resolution_cache (cache_key, cache_value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(cache_key) DO UPDATE SET
                    cache_value = excluded.cache_value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!("flushed {} cached resolution(s)", dirty.len());
        Ok(dirty.len())
    }

    /// Number of persisted entries.
    pub async fn count(&self) -> Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resolution_cache")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// Delete every persisted entry. Returns the number removed.
    pub async fn clear(&self) -> Result<u64> {
        let res = sqlx::query("DELETE FROM resolution_cache")
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<CacheDb> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = CacheDb { pool };
    db.migrate().await?;
    Ok(db)
}
