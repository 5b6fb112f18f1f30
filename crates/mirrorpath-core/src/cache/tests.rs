//! Tests for cache keys, the in-memory store and its SQLite persistence.

use crate::snapshot::Snapshot;

use super::db::open_memory;
use super::{CacheDb, CacheKey, MemoryCache, ResolutionCache};

#[test]
fn key_encodes_missing_downloaded_at_explicitly() {
    let snap = Snapshot::new("https://example.com", "/archive/1", "1700000000.0");
    let key = CacheKey::for_snapshot(&snap).to_string_key();
    assert_eq!(
        key,
        format!("{}:1700000000.0-none-output-path", snap.url_hash())
    );
}

#[test]
fn key_differs_by_downloaded_at() {
    let snap = Snapshot::new("https://example.com", "/archive/1", "1700000000.0");
    let a = CacheKey::for_snapshot(&snap).to_string_key();
    let b = CacheKey::for_snapshot(&snap.clone().with_downloaded_at(Some(1700000042.5)))
        .to_string_key();
    assert_ne!(a, b);
    assert!(b.contains("-1700000042.5-"));
}

#[test]
fn memory_cache_last_write_wins() {
    let cache = MemoryCache::new();
    assert_eq!(cache.get("k"), None);
    cache.set("k", "example.com/a.html");
    cache.set("k", "example.com/b.html");
    assert_eq!(cache.get("k").as_deref(), Some("example.com/b.html"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn take_dirty_only_returns_new_writes() {
    let cache = MemoryCache::new();
    cache.insert_clean("loaded".to_string(), "x".to_string());
    cache.set("fresh", "y");
    assert_eq!(cache.take_dirty(), vec![("fresh".to_string(), "y".to_string())]);
    assert!(cache.take_dirty().is_empty());
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn flush_then_load_into_new_cache() {
    let db = open_memory().await.unwrap();
    let cache = MemoryCache::new();
    cache.set("a", "example.com/index.html");
    cache.set("b", "example.org");
    assert_eq!(db.flush(&cache).await.unwrap(), 2);
    assert_eq!(db.flush(&cache).await.unwrap(), 0);
    assert_eq!(db.count().await.unwrap(), 2);

    let fresh = MemoryCache::new();
    assert_eq!(db.load_into(&fresh).await.unwrap(), 2);
    assert_eq!(fresh.get("a").as_deref(), Some("example.com/index.html"));
    assert!(fresh.take_dirty().is_empty());
}

#[tokio::test]
async fn flush_overwrites_existing_key() {
    let db = open_memory().await.unwrap();
    let cache = MemoryCache::new();
    cache.set("a", "old");
    db.flush(&cache).await.unwrap();
    cache.set("a", "new");
    db.flush(&cache).await.unwrap();
    assert_eq!(db.get("a").await.unwrap().as_deref(), Some("new"));
    assert_eq!(db.count().await.unwrap(), 1);
}

#[tokio::test]
async fn preload_and_clear() {
    let db = open_memory().await.unwrap();
    let cache = MemoryCache::new();
    cache.set("a", "v");
    db.flush(&cache).await.unwrap();

    let other = MemoryCache::new();
    assert!(db.preload(&other, "a").await.unwrap());
    assert!(!db.preload(&other, "missing").await.unwrap());
    assert_eq!(other.get("a").as_deref(), Some("v"));

    assert_eq!(db.clear().await.unwrap(), 1);
    assert_eq!(db.count().await.unwrap(), 0);
}

#[tokio::test]
async fn open_at_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested dir").join("cache.db");
    let db = CacheDb::open_at(&path).await.unwrap();
    assert_eq!(db.count().await.unwrap(), 0);
    assert!(path.exists());
}
