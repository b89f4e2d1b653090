//! JSON access to world state, shared by the services

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DomainResult, Ledger, LedgerKey};

/// Read and decode `key`. `Ok(None)` when absent.
pub(crate) async fn read_json<T: DeserializeOwned>(
    ledger: &dyn Ledger,
    key: LedgerKey<'_>,
) -> DomainResult<Option<T>> {
    match ledger.get(&key.to_string()).await? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub(crate) async fn contains(ledger: &dyn Ledger, key: LedgerKey<'_>) -> DomainResult<bool> {
    Ok(ledger.get(&key.to_string()).await?.is_some())
}

pub(crate) async fn write_json<T: Serialize>(
    ledger: &dyn Ledger,
    key: LedgerKey<'_>,
    value: &T,
) -> DomainResult<()> {
    let bytes = serde_json::to_vec(value)?;
    ledger.put(&key.to_string(), bytes).await?;
    Ok(())
}
