//! Ascending probe: look for the rendered page at the deepest plausible
//! directory, then retry one level up at a time.
//!
//! Download tools truncate, collapse or rename trailing path segments
//! (`abc` becomes `abc.html`, `abc?v=1` becomes `abc@v=1.html`, a trailing
//! `/` becomes `index.html`). Retrying a few levels up recovers the common
//! cases without walking the whole tree.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::url_model::SearchPath;

use super::ResolveFailure;

/// Extensions a mirrored page may end up with. Matched case-insensitively;
/// `.htm`/`.shtm` cover single-character truncation.
const HTML_SUFFIXES: [&str; 4] = [".html", ".htm", ".shtml", ".shtm"];

/// True if `name` ends with an HTML-like extension. A bare `.html` counts:
/// it is still a page once joined to its directory.
pub fn is_html_like(name: &str) -> bool {
    let bytes = name.as_bytes();
    HTML_SUFFIXES.iter().any(|suffix| {
        bytes.len() >= suffix.len()
            && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    })
}

/// Runs the probe for one snapshot. Returns the match relative to `link_dir`.
pub fn probe(link_dir: &Path, search: &SearchPath, max_levels: usize) -> Option<PathBuf> {
    let last_segment = search.last_segment();
    let domain_root = search.domain_root(link_dir);
    let mut search_dir = search.search_dir(link_dir);

    for level in 0..max_levels {
        match probe_level(&search_dir, &domain_root, &last_segment) {
            Ok(Some(found)) => {
                tracing::debug!(level, path = %found.display(), "probe matched");
                return found.strip_prefix(link_dir).ok().map(Path::to_path_buf);
            }
            Ok(None) => {}
            Err(failure) => {
                tracing::debug!(level, "probe level skipped: {}", failure);
            }
        }

        match search_dir.parent() {
            Some(parent) if parent.starts_with(link_dir) && parent != link_dir => {
                search_dir = parent.to_path_buf();
            }
            _ => break,
        }
    }
    None
}

/// Tests a single directory level.
fn probe_level(
    search_dir: &Path,
    domain_root: &Path,
    last_segment: &str,
) -> Result<Option<PathBuf>, ResolveFailure> {
    match fs::metadata(search_dir) {
        Ok(meta) if meta.is_dir() => {
            let names = list_file_names(search_dir)?;
            Ok(names
                .into_iter()
                .find(|name| is_html_like(&name.to_string_lossy()))
                .map(|name| search_dir.join(name)))
        }
        Ok(_) => probe_parent(search_dir, domain_root, last_segment),
        Err(e) if is_absent(&e) => probe_parent(search_dir, domain_root, last_segment),
        Err(e) => Err(ResolveFailure::access(search_dir, e)),
    }
}

/// Pages saved without extension rewriting (feeds, binary blobs) sit next to
/// the search dir under the URL's last segment. Only parents inside the
/// domain directory are considered.
fn probe_parent(
    search_dir: &Path,
    domain_root: &Path,
    last_segment: &str,
) -> Result<Option<PathBuf>, ResolveFailure> {
    if last_segment.is_empty() {
        return Ok(None);
    }
    let Some(parent) = search_dir.parent().filter(|p| p.starts_with(domain_root)) else {
        return Ok(None);
    };
    match fs::metadata(parent) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Ok(None),
        Err(e) if is_absent(&e) => return Ok(None),
        Err(e) => return Err(ResolveFailure::access(parent, e)),
    }
    let names = list_file_names(parent)?;
    Ok(names
        .into_iter()
        .find(|name| name.as_os_str() == last_segment)
        .map(|name| parent.join(name)))
}

/// Missing paths, or paths running through a regular file.
fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Names of non-directory entries in `dir`, sorted so "first match" is stable.
fn list_file_names(dir: &Path) -> Result<Vec<OsString>, ResolveFailure> {
    let entries = fs::read_dir(dir).map_err(|e| ResolveFailure::access(dir, e))?;
    let mut names: Vec<OsString> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name())
        .collect();
    names.sort();
    Ok(names)
}
