use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use super::ResolutionCache;

/// Process-local cache store.
///
/// Keys written through [`ResolutionCache::set`] are remembered as dirty until
/// [`MemoryCache::take_dirty`] hands them to a persistent store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
    dirty: Mutex<HashSet<String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry that is already persisted (not marked dirty).
    pub fn insert_clean(&self, key: String, value: String) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    /// Remove and return every entry written since the last call.
    pub fn take_dirty(&self) -> Vec<(String, String)> {
        let keys: Vec<String> = self
            .dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<(String, String)> = keys
            .into_iter()
            .filter_map(|k| entries.get(&k).cloned().map(|v| (k, v)))
            .collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResolutionCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
    }
}
