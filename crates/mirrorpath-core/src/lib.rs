pub mod config;
pub mod logging;

pub mod cache;
pub mod resolver;
pub mod safe_path;
pub mod snapshot;
pub mod url_model;
