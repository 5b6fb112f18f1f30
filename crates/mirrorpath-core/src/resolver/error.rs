//! Internal failure taxonomy. None of these reach callers of `resolve`;
//! they only drive logging and tests.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ResolveFailure {
    /// The OS refused to stat or list a path (bad bytes, name too long, permissions).
    #[error("cannot access {}: {source}", path.display())]
    TransientAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Candidate does not survive a UTF-8 round trip.
    #[error("candidate is not valid UTF-8: {candidate}")]
    EncodingViolation { candidate: String },
    /// Candidate is longer than the portability limit.
    #[error("candidate is {len} characters long (limit {max})")]
    LengthViolation { len: usize, max: usize },
    /// Nothing was found anywhere in the search.
    #[error("no output found")]
    GenuineAbsence,
}

impl ResolveFailure {
    pub(crate) fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ResolveFailure::TransientAccess {
            path: path.into(),
            source,
        }
    }
}
