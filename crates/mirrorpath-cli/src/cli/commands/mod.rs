//! CLI command handlers. Each command is in its own file.

mod cache;
mod completions;
mod resolve;
mod scan;

pub use cache::{run_cache_clear, run_cache_stats};
pub use completions::{run_completions, run_man};
pub use resolve::{run_resolve, snapshot_from_args};
pub use scan::run_scan;
