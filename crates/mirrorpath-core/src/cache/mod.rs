//! Memoization of resolved output paths.
//!
//! Probing a snapshot directory is expensive on slow storage, so resolved
//! candidates are remembered per `(url hash, timestamp, downloaded_at)`. The
//! store is injected into the resolver as a [`ResolutionCache`]; entries never
//! expire here and nothing invalidates them when a snapshot directory changes.
//! Callers that mutate snapshot directories must bypass or clear the cache.

mod db;
mod key;
mod memory;

pub use db::CacheDb;
pub use key::CacheKey;
pub use memory::MemoryCache;

/// Key-value store consulted before probing the filesystem.
///
/// `get`/`set` are expected to be atomic per key; concurrent writers of the
/// same key simply overwrite each other.
pub trait ResolutionCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[cfg(test)]
mod tests;
