use crate::snapshot::Snapshot;

/// Identity of one cached resolution.
///
/// A missing `downloaded_at` is encoded as `none` so it can never collide
/// with a real completion time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheKey {
    pub url_hash: String,
    pub timestamp: String,
    pub downloaded_at: Option<f64>,
}

impl CacheKey {
    pub fn for_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            url_hash: snapshot.url_hash(),
            timestamp: snapshot.timestamp.clone(),
            downloaded_at: snapshot.downloaded_at,
        }
    }

    /// String form used by the backing store:
    /// `"{url_hash}:{timestamp}-{downloaded_at|none}-output-path"`.
    pub fn to_string_key(&self) -> String {
        let downloaded = match self.downloaded_at {
            Some(t) => t.to_string(),
            None => "none".to_string(),
        };
        format!("{}:{}-{}-output-path", self.url_hash, self.timestamp, downloaded)
    }
}
