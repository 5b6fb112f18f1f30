//! Loading snapshots from their on-disk `index.json`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::Snapshot;

/// Per-snapshot metadata file written next to the mirrored content.
pub const INDEX_FILENAME: &str = "index.json";

#[derive(Debug, Deserialize)]
struct SnapshotIndex {
    url: String,
    timestamp: String,
    #[serde(default)]
    downloaded_at: Option<f64>,
}

impl Snapshot {
    /// Reads `dir/index.json`; `link_dir` is `dir` itself.
    pub fn load_from_dir(dir: &Path) -> Result<Snapshot> {
        let index_path = dir.join(INDEX_FILENAME);
        let bytes = fs::read(&index_path)
            .with_context(|| format!("read snapshot index: {}", index_path.display()))?;
        let index: SnapshotIndex = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse snapshot index: {}", index_path.display()))?;
        Ok(Snapshot {
            url: index.url,
            link_dir: dir.to_path_buf(),
            timestamp: index.timestamp,
            downloaded_at: index.downloaded_at,
        })
    }
}

/// Every immediate subdirectory of `archive_dir` with a readable index, sorted
/// by directory name. Unreadable snapshots are logged and skipped so one bad
/// directory does not abort a batch.
pub fn discover_snapshots(archive_dir: &Path) -> Result<Vec<Snapshot>> {
    let entries = fs::read_dir(archive_dir)
        .with_context(|| format!("read archive dir: {}", archive_dir.display()))?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.join(INDEX_FILENAME).is_file())
        .collect();
    dirs.sort();

    let mut snapshots = Vec::with_capacity(dirs.len());
    for dir in dirs {
        match Snapshot::load_from_dir(&dir) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => tracing::warn!(dir = %dir.display(), "skipping snapshot: {:#}", e),
        }
    }
    Ok(snapshots)
}
