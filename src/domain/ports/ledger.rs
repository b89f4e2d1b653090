//! Ledger port: the versioned key-value store every transaction runs against
//!
//! The contract never locks or retries; it relies on the ledger for
//! per-key serializability and reports its failures as they come.

use async_trait::async_trait;

use crate::shared::LedgerError;

/// One world-state entry.
pub type LedgerEntry = (String, Vec<u8>);

/// Lazy scan over a point-in-time snapshot, ascending by key.
///
/// Dropping the iterator releases the snapshot, so every exit path
/// (early `?` included) closes it.
pub type LedgerScan = Box<dyn Iterator<Item = Result<LedgerEntry, LedgerError>> + Send>;

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Read a key. `Ok(None)` means absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan `[start, end)` in ascending key order. An empty bound is open,
    /// so `range_scan("", "")` walks the whole keyspace.
    async fn range_scan(&self, start: &str, end: &str) -> Result<LedgerScan, LedgerError>;
}
