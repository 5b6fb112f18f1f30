//! Rejects candidate paths that are unsafe to hand back to callers.
//!
//! Directory entry names are raw bytes on Linux; mirrored URLs routinely
//! produce names that are not valid UTF-8 or that exceed what other platforms
//! accept. Such candidates are reported as absent rather than passed on.

use std::borrow::Cow;
use std::path::Path;

use crate::resolver::ResolveFailure;

/// Default portability limit on candidate length, in characters.
pub const MAX_CANDIDATE_LEN: usize = 250;

/// Returns the candidate as a string if it survives a lossless UTF-8 round
/// trip and is at most `max_len` characters long.
pub fn validate(candidate: &Path, max_len: usize) -> Result<String, ResolveFailure> {
    let text = match candidate.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(lossy) => {
            return Err(ResolveFailure::EncodingViolation { candidate: lossy });
        }
    };

    let len = text.chars().count();
    if len > max_len {
        return Err(ResolveFailure::LengthViolation { len, max: max_len });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_candidate() {
        let p = Path::new("example.com/index.html");
        assert_eq!(validate(p, MAX_CANDIDATE_LEN).unwrap(), "example.com/index.html");
    }

    #[test]
    fn accepts_non_ascii_utf8() {
        let p = Path::new("example.com/wiki/Café.html");
        let accepted = validate(p, MAX_CANDIDATE_LEN).unwrap();
        let round_trip = String::from_utf8_lossy(accepted.as_bytes());
        assert_eq!(round_trip.as_bytes(), p.as_os_str().as_encoded_bytes());
    }

    #[test]
    fn length_limit_is_inclusive() {
        let name = "a".repeat(MAX_CANDIDATE_LEN);
        assert!(validate(Path::new(&name), MAX_CANDIDATE_LEN).is_ok());

        let name = "a".repeat(MAX_CANDIDATE_LEN + 1);
        let err = validate(Path::new(&name), MAX_CANDIDATE_LEN).unwrap_err();
        assert!(matches!(err, ResolveFailure::LengthViolation { len: 251, max: 250 }));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(200);
        assert!(validate(Path::new(&name), MAX_CANDIDATE_LEN).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn rejects_invalid_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::path::PathBuf;

        let mut p = PathBuf::from("example.com");
        p.push(OsStr::from_bytes(b"bad\xff\xfename.html"));
        let err = validate(&p, MAX_CANDIDATE_LEN).unwrap_err();
        assert!(matches!(err, ResolveFailure::EncodingViolation { .. }));
    }
}
