//! In-memory ledger implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Ledger, LedgerEntry, LedgerScan};
use crate::shared::LedgerError;

/// In-memory world state for development, the CLI and tests.
///
/// Keeps only the latest value per key; version history belongs to a real
/// ledger peer.
pub struct InMemoryLedger {
    state: DashMap<String, Vec<u8>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            state: DashMap::new(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let ledger = Self::new();
        for (key, value) in entries {
            ledger.state.insert(key, value);
        }
        ledger
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Copy of the current world state, ascending by key.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .state
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Raw write that bypasses the contract, for seeding fixtures.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.state.insert(key.into(), value.into());
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    async fn range_scan(&self, start: &str, end: &str) -> Result<LedgerScan, LedgerError> {
        let in_range = |key: &str| {
            (start.is_empty() || key >= start) && (end.is_empty() || key < end)
        };

        let snapshot: Vec<LedgerEntry> = self
            .entries()
            .into_iter()
            .filter(|(key, _)| in_range(key.as_str()))
            .collect();

        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }
}
