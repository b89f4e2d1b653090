//! File persistence for the in-memory ledger
//!
//! The snapshot is a JSON object mapping each key to its base64 value, with
//! keys written in ascending order so diffs between runs stay readable.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, info};

use super::InMemoryLedger;
use crate::shared::LedgerError;

impl InMemoryLedger {
    /// Load world state from `path`. A missing file is an empty ledger.
    pub fn load_snapshot(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot yet, starting empty");
            return Ok(Self::new());
        }

        let raw = fs::read_to_string(path)?;
        let encoded: BTreeMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| LedgerError::Snapshot(format!("{}: {e}", path.display())))?;

        let mut entries = Vec::with_capacity(encoded.len());
        for (key, value) in encoded {
            let bytes = STANDARD
                .decode(value)
                .map_err(|e| LedgerError::Snapshot(format!("value of {key}: {e}")))?;
            entries.push((key, bytes));
        }

        info!(path = %path.display(), entries = entries.len(), "Loaded ledger snapshot");
        Ok(Self::from_entries(entries))
    }

    /// Write world state to `path`, replacing it atomically.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), LedgerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let encoded: BTreeMap<String, String> = self
            .entries()
            .into_iter()
            .map(|(key, value)| (key, STANDARD.encode(value)))
            .collect();
        let body = serde_json::to_string_pretty(&encoded)
            .map_err(|e| LedgerError::Snapshot(e.to_string()))?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, path)?;

        debug!(path = %path.display(), entries = encoded.len(), "Saved ledger snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ledger;
    use std::path::PathBuf;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("biomtake-{}", uuid::Uuid::new_v4()))
            .join("ledger.json")
    }

    #[tokio::test]
    async fn save_then_load_restores_world_state() {
        let path = scratch_path();
        let ledger = InMemoryLedger::new();
        ledger.put("USER_doc1", br#"{"userId":"doc1"}"#.to_vec()).await.unwrap();
        ledger.put("HP1", vec![0, 159, 255]).await.unwrap();

        ledger.save_snapshot(&path).unwrap();
        let restored = InMemoryLedger::load_snapshot(&path).unwrap();

        assert_eq!(restored.entries(), ledger.entries());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let restored = InMemoryLedger::load_snapshot(&scratch_path()).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn garbage_is_a_snapshot_error() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            InMemoryLedger::load_snapshot(&path),
            Err(LedgerError::Snapshot(_))
        ));

        fs::write(&path, r#"{"k":"%%%"}"#).unwrap();
        assert!(matches!(
            InMemoryLedger::load_snapshot(&path),
            Err(LedgerError::Snapshot(_))
        ));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
