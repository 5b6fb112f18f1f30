//! Last-resort searches once the ascending probe has nothing usable.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use walkdir::WalkDir;

use crate::safe_path;
use crate::url_model::SearchPath;

/// Bounds on the recursive scan so pathological trees cannot stall a batch.
#[derive(Debug, Clone)]
pub struct ScanLimits {
    pub max_entries: usize,
    pub deadline: Option<Duration>,
    pub max_candidate_len: usize,
}

/// Any file under the domain directory. Among acceptable files the greatest
/// relative path wins, which is the last file of a name-sorted depth-first walk.
pub fn scan_domain_files(
    link_dir: &Path,
    search: &SearchPath,
    backup_suffix: &str,
    limits: &ScanLimits,
) -> Option<String> {
    let root = search.domain_root(link_dir);
    let started = Instant::now();
    let mut best: Option<(PathBuf, String)> = None;

    let walker = WalkDir::new(&root).min_depth(1).sort_by_file_name();
    for (visited, entry) in walker.into_iter().enumerate() {
        if visited >= limits.max_entries {
            tracing::warn!(root = %root.display(), "fallback scan stopped after {} entries", visited);
            break;
        }
        if limits.deadline.is_some_and(|d| started.elapsed() >= d) {
            tracing::warn!(root = %root.display(), "fallback scan hit its time limit");
            break;
        }
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("fallback scan skipped entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(backup_suffix) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(link_dir) else {
            continue;
        };
        match safe_path::validate(rel, limits.max_candidate_len) {
            Ok(text) => {
                if best.as_ref().map_or(true, |(b, _)| rel > b.as_path()) {
                    best = Some((rel.to_path_buf(), text));
                }
            }
            Err(failure) => tracing::debug!("fallback candidate rejected: {}", failure),
        }
    }

    best.map(|(_, text)| text)
}

/// Something was downloaded for this host even if no file can be singled out:
/// the domain directory, or the bare-host directory when the port was dropped.
pub fn domain_dir_fallback(link_dir: &Path, search: &SearchPath) -> Option<String> {
    if search.domain_root(link_dir).is_dir() {
        return Some(search.domain_dir.clone());
    }
    if !search.host_dir.is_empty() && link_dir.join(&search.host_dir).is_dir() {
        return Some(search.host_dir.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn limits() -> ScanLimits {
        ScanLimits {
            max_entries: 1000,
            deadline: None,
            max_candidate_len: safe_path::MAX_CANDIDATE_LEN,
        }
    }

    #[test]
    fn scan_picks_greatest_path_and_skips_backups() {
        let tmp = tempfile::tempdir().unwrap();
        let dom = tmp.path().join("example.com");
        fs::create_dir_all(dom.join("a")).unwrap();
        fs::create_dir_all(dom.join("b")).unwrap();
        fs::write(dom.join("a/x.css"), "").unwrap();
        fs::write(dom.join("b/y.js"), "").unwrap();
        fs::write(dom.join("zz.html.orig"), "").unwrap();

        let search = SearchPath::from_url("https://example.com/");
        assert_eq!(
            scan_domain_files(tmp.path(), &search, ".orig", &limits()).as_deref(),
            Some("example.com/b/y.js")
        );
    }

    #[test]
    fn scan_respects_entry_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let dom = tmp.path().join("example.com");
        fs::create_dir_all(&dom).unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(dom.join(name), "").unwrap();
        }
        let search = SearchPath::from_url("https://example.com/");
        let bounded = ScanLimits {
            max_entries: 2,
            ..limits()
        };
        assert_eq!(
            scan_domain_files(tmp.path(), &search, ".orig", &bounded).as_deref(),
            Some("example.com/b.txt")
        );
    }

    #[test]
    fn scan_of_missing_domain_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let search = SearchPath::from_url("https://example.com/");
        assert_eq!(scan_domain_files(tmp.path(), &search, ".orig", &limits()), None);
    }

    #[test]
    fn domain_dir_fallback_prefers_port_dir_then_host() {
        let tmp = tempfile::tempdir().unwrap();
        let search = SearchPath::from_url("http://example.com:8080/x");
        assert_eq!(domain_dir_fallback(tmp.path(), &search), None);

        fs::create_dir_all(tmp.path().join("example.com")).unwrap();
        assert_eq!(
            domain_dir_fallback(tmp.path(), &search).as_deref(),
            Some("example.com")
        );

        fs::create_dir_all(tmp.path().join("example.com+8080")).unwrap();
        assert_eq!(
            domain_dir_fallback(tmp.path(), &search).as_deref(),
            Some("example.com+8080")
        );
    }
}
