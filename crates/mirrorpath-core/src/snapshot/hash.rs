use sha2::{Digest, Sha256};

const URL_HASH_LEN: usize = 20;

/// Short stable identifier for a URL: the first 20 hex chars of its SHA-256.
pub fn url_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(URL_HASH_LEN);
    hex
}
