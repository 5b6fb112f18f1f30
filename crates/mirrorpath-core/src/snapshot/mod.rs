//! Snapshots: one mirrored capture of a URL and the directory holding it.
//!
//! A snapshot directory carries an `index.json` describing the capture. The
//! resolver only reads snapshots; it never creates or mutates their directories.

mod hash;
mod index;

use std::path::PathBuf;

pub use hash::url_hash;
pub use index::{discover_snapshots, INDEX_FILENAME};

/// One captured mirror of a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub url: String,
    /// Directory dedicated to this snapshot's downloaded artifacts.
    pub link_dir: PathBuf,
    /// Capture-time identifier.
    pub timestamp: String,
    /// Capture completion time, Unix seconds.
    pub downloaded_at: Option<f64>,
}

impl Snapshot {
    pub fn new(
        url: impl Into<String>,
        link_dir: impl Into<PathBuf>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            link_dir: link_dir.into(),
            timestamp: timestamp.into(),
            downloaded_at: None,
        }
    }

    pub fn with_downloaded_at(mut self, downloaded_at: Option<f64>) -> Self {
        self.downloaded_at = downloaded_at;
        self
    }

    pub fn url_hash(&self) -> String {
        url_hash(&self.url)
    }
}
