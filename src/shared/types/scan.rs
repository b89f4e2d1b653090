//! Per-item results for full-keyspace scans.

use tracing::debug;

/// A ledger entry that could not be turned into the requested entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub key: String,
    pub reason: String,
}

impl ScanFailure {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

/// One scanned entry: the decoded entity or the reason it was unreadable.
pub type ScanItem<T> = Result<T, ScanFailure>;

/// Keep the readable entries, dropping the rest with a debug log.
pub fn successes<T>(items: Vec<ScanItem<T>>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Ok(value) => Some(value),
            Err(failure) => {
                debug!(key = %failure.key, reason = %failure.reason, "Skipping unreadable ledger entry");
                None
            }
        })
        .collect()
}
