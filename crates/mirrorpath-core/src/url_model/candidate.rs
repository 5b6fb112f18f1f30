//! Derives where a mirrored URL should live under a snapshot directory.

use std::path::{Path, PathBuf};

use super::{domain, host, path, urldecode, without_fragment, without_query};

/// Domain directory name and path segments derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    /// `host[:port]` with `:` replaced by `+`.
    pub domain_dir: String,
    /// `host` alone, for mirrors that dropped the port.
    pub host_dir: String,
    /// URL path without query or fragment, leading/trailing `/` trimmed, still encoded.
    pub full_path: String,
}

impl SearchPath {
    pub fn from_url(url: &str) -> Self {
        let raw_path = path(url);
        let full_path = without_fragment(without_query(&raw_path))
            .trim_matches('/')
            .to_string();
        Self {
            domain_dir: domain(url).replace(':', "+"),
            host_dir: host(url).replace(':', "+"),
            full_path,
        }
    }

    /// Decoded path segments, dropping empty, `.` and `..` segments so the
    /// result can never climb out of the domain directory.
    pub fn segments(&self) -> Vec<String> {
        urldecode(&self.full_path)
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(str::to_string)
            .collect()
    }

    /// Percent-decoded final segment of the URL path.
    pub fn last_segment(&self) -> String {
        let last = self.full_path.rsplit('/').next().unwrap_or_default();
        urldecode(last)
    }

    /// `link_dir / domain_dir`.
    pub fn domain_root(&self, link_dir: &Path) -> PathBuf {
        link_dir.join(&self.domain_dir)
    }

    /// Deepest directory the download tool could have written the page to.
    pub fn search_dir(&self, link_dir: &Path) -> PathBuf {
        let mut dir = self.domain_root(link_dir);
        for segment in self.segments() {
            dir.push(segment);
        }
        dir
    }
}
