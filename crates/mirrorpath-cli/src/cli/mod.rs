//! CLI for the mirrorpath snapshot resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mirrorpath_core::cache::CacheDb;
use mirrorpath_core::config::{self, ResolverConfig};
use std::path::PathBuf;

use commands::{
    run_cache_clear, run_cache_stats, run_completions, run_man, run_resolve, run_scan,
    snapshot_from_args,
};

/// Top-level CLI for mirrorpath.
#[derive(Debug, Parser)]
#[command(name = "mirrorpath")]
#[command(about = "Find the rendered page inside a mirrored snapshot directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve the output file for one mirrored URL.
    Resolve {
        /// URL that was mirrored.
        url: String,
        /// Snapshot directory holding the mirrored content.
        #[arg(long, value_name = "DIR")]
        link_dir: PathBuf,
        /// Capture timestamp (defaults to the directory name).
        #[arg(long)]
        timestamp: Option<String>,
        /// Capture completion time, Unix seconds.
        #[arg(long, value_name = "SECS")]
        downloaded_at: Option<f64>,
        /// Ignore cached answers and do not store the result.
        #[arg(long)]
        no_cache: bool,
    },

    /// Resolve every snapshot under an archive directory.
    Scan {
        /// Directory whose subdirectories are snapshots with an index.json.
        archive_dir: PathBuf,
        /// Resolve up to N snapshots concurrently (default from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Ignore cached answers and do not store results.
        #[arg(long)]
        no_cache: bool,
    },

    /// Inspect or clear the persistent resolution cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Show the number of cached resolutions.
    Stats,
    /// Delete every cached resolution.
    Clear,
}

async fn open_cache_db(cfg: &ResolverConfig) -> Result<CacheDb> {
    match &cfg.cache_db_path {
        Some(path) => CacheDb::open_at(path).await,
        None => CacheDb::open_default().await,
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = open_cache_db(&cfg).await?;

        match cli.command {
            CliCommand::Resolve {
                url,
                link_dir,
                timestamp,
                downloaded_at,
                no_cache,
            } => {
                let snapshot = snapshot_from_args(url, link_dir, timestamp, downloaded_at);
                run_resolve(&db, &cfg, snapshot, !no_cache).await?;
            }
            CliCommand::Scan {
                archive_dir,
                jobs,
                no_cache,
            } => {
                let jobs = jobs.unwrap_or(cfg.scan_jobs);
                run_scan(&db, &cfg, &archive_dir, jobs, !no_cache).await?;
            }
            CliCommand::Cache { action } => match action {
                CacheAction::Stats => run_cache_stats(&db).await?,
                CacheAction::Clear => run_cache_clear(&db).await?,
            },
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
