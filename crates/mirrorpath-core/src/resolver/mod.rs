//! Locate the file a mirroring tool produced for a snapshot's URL.
//!
//! The URL-to-filename mapping applied by the download tool (extension
//! rewriting, query suffixes, `index.html` insertion, decoding quirks,
//! truncation) cannot be inverted, so resolution is a best-effort search:
//!
//! 1. cached answer, unless the caller bypasses the cache
//! 2. ascending probe from the deepest plausible directory
//! 3. safety validation of the probe's candidate
//! 4. bounded scan of the whole domain directory
//! 5. the domain directory itself (with or without port)
//!
//! Every failure along the way collapses to `None`; a single pathological URL
//! never aborts a caller's batch.

mod error;
mod fallback;
mod probe;

use std::sync::Arc;

use crate::cache::{CacheKey, ResolutionCache};
use crate::config::ResolverConfig;
use crate::safe_path;
use crate::snapshot::Snapshot;
use crate::url_model::SearchPath;

pub use error::ResolveFailure;
pub use fallback::ScanLimits;
pub use probe::is_html_like;

/// Which stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Probe,
    Scan,
    DomainDir,
}

/// Candidate path (relative to the snapshot's `link_dir`) and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: String,
    pub source: ResolutionSource,
}

/// Stateless resolver; safe to share across threads.
pub struct PathResolver {
    config: ResolverConfig,
    cache: Arc<dyn ResolutionCache>,
}

impl PathResolver {
    pub fn new(config: ResolverConfig, cache: Arc<dyn ResolutionCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Best-effort path of the rendered page for `snapshot`, relative to its
    /// `link_dir`, or `None` if nothing usable was downloaded.
    pub fn resolve(&self, snapshot: &Snapshot, use_cache: bool) -> Option<String> {
        self.resolve_with_source(snapshot, use_cache).map(|r| r.path)
    }

    /// Like [`PathResolver::resolve`], also reporting which stage answered.
    pub fn resolve_with_source(&self, snapshot: &Snapshot, use_cache: bool) -> Option<Resolution> {
        let key = CacheKey::for_snapshot(snapshot).to_string_key();
        if use_cache {
            if let Some(hit) = self.cache.get(&key).filter(|v| !v.is_empty()) {
                tracing::debug!(url = %snapshot.url, "cache hit: {}", hit);
                return Some(Resolution {
                    path: hit,
                    source: ResolutionSource::Cache,
                });
            }
        }

        let search = SearchPath::from_url(&snapshot.url);
        if search.domain_dir.is_empty() {
            tracing::debug!(url = %snapshot.url, "{}: URL has no host", ResolveFailure::GenuineAbsence);
            return None;
        }

        match self.primary(snapshot, &search) {
            Ok(path) => {
                if use_cache {
                    self.cache.set(&key, &path);
                }
                return Some(Resolution {
                    path,
                    source: ResolutionSource::Probe,
                });
            }
            Err(failure) => {
                tracing::debug!(url = %snapshot.url, "probe gave no usable candidate: {}", failure);
            }
        }

        let resolution = self.fallback(snapshot, &search);
        match &resolution {
            Some(r) if use_cache && self.config.cache_fallback_results => {
                self.cache.set(&key, &r.path);
            }
            Some(_) => {}
            None => {
                tracing::debug!(url = %snapshot.url, "{}", ResolveFailure::GenuineAbsence);
            }
        }
        resolution
    }

    /// Ascending probe plus safety validation, without cache or fallbacks.
    pub fn resolve_primary(&self, snapshot: &Snapshot) -> Option<String> {
        let search = SearchPath::from_url(&snapshot.url);
        if search.domain_dir.is_empty() {
            return None;
        }
        self.primary(snapshot, &search).ok()
    }

    fn primary(&self, snapshot: &Snapshot, search: &SearchPath) -> Result<String, ResolveFailure> {
        let candidate = probe::probe(&snapshot.link_dir, search, self.config.max_ascent_levels)
            .ok_or(ResolveFailure::GenuineAbsence)?;
        safe_path::validate(&candidate, self.config.max_candidate_len)
    }

    fn fallback(&self, snapshot: &Snapshot, search: &SearchPath) -> Option<Resolution> {
        let limits = ScanLimits {
            max_entries: self.config.max_scan_entries,
            deadline: self.config.scan_deadline(),
            max_candidate_len: self.config.max_candidate_len,
        };
        if let Some(path) = fallback::scan_domain_files(
            &snapshot.link_dir,
            search,
            &self.config.backup_suffix,
            &limits,
        ) {
            return Some(Resolution {
                path,
                source: ResolutionSource::Scan,
            });
        }
        fallback::domain_dir_fallback(&snapshot.link_dir, search).map(|path| Resolution {
            path,
            source: ResolutionSource::DomainDir,
        })
    }
}
