use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Resolver configuration loaded from `~/.config/mirrorpath/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Number of directory levels the ascending probe tries before giving up.
    pub max_ascent_levels: usize,
    /// Candidates longer than this many characters are rejected.
    pub max_candidate_len: usize,
    /// Files ending in this suffix are backups left by link conversion and never returned.
    pub backup_suffix: String,
    /// Upper bound on directory entries visited by the fallback scan.
    pub max_scan_entries: usize,
    /// Optional wall-clock bound for the fallback scan, in seconds.
    #[serde(default)]
    pub max_scan_secs: Option<u64>,
    /// Also memoize results produced by the fallback scan (off by default).
    #[serde(default)]
    pub cache_fallback_results: bool,
    /// Override for the persistent cache database location.
    #[serde(default)]
    pub cache_db_path: Option<PathBuf>,
    /// Default number of snapshots resolved concurrently by `mirrorpath scan`.
    #[serde(default = "default_scan_jobs")]
    pub scan_jobs: usize,
}

fn default_scan_jobs() -> usize {
    4
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_ascent_levels: 4,
            max_candidate_len: 250,
            backup_suffix: ".orig".to_string(),
            max_scan_entries: 100_000,
            max_scan_secs: None,
            cache_fallback_results: false,
            cache_db_path: None,
            scan_jobs: default_scan_jobs(),
        }
    }
}

impl ResolverConfig {
    /// Wall-clock budget for the fallback scan, if one is configured.
    pub fn scan_deadline(&self) -> Option<Duration> {
        self.max_scan_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mirrorpath")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ResolverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ResolverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(&path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ResolverConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
