//! URL modeling for mirrored snapshots.
//!
//! Splits a URL into the pieces a mirroring tool uses to name its output:
//! the network location (which becomes the domain directory) and the decoded
//! path segments below it.

mod candidate;
mod decode;
mod parts;

pub use candidate::SearchPath;
pub use decode::urldecode;
pub use parts::{domain, host, path, without_fragment, without_query};
