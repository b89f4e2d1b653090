//! IoMT device registry
//!
//! Devices live under their bare HPBIM, sharing the keyspace with every other
//! entity. Registration keeps new ids out of the reserved namespaces, and the
//! readers below treat reserved-prefix keys as "not a device".

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::identity::IdentityRegistry;
use crate::application::state::{read_json, write_json};
use crate::domain::keys::{reserved_prefix_of, validate_device_id};
use crate::domain::{
    Capability, Clock, Device, DomainError, DomainResult, Ledger, LedgerKey,
};
use crate::shared::{ledger_precision, successes, ScanFailure, ScanItem};

pub struct DeviceRegistry {
    ledger: Arc<dyn Ledger>,
    identity: Arc<IdentityRegistry>,
    clock: Arc<dyn Clock>,
}

impl DeviceRegistry {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        identity: Arc<IdentityRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            identity,
            clock,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Register a device on behalf of an active user.
    pub async fn register(&self, hpbim: &str, pidm: &str, registered_by: &str) -> DomainResult<Device> {
        validate_device_id(hpbim)?;

        let registrant = self.identity.lookup_active(registered_by).await?;
        if !registrant.can(Capability::RegisterDevice) {
            return Err(DomainError::Forbidden(format!(
                "role {} may not register devices",
                registrant.role
            )));
        }

        if self.exists(hpbim).await? {
            warn!(hpbim, registered_by, "Rejected duplicate device registration");
            return Err(DomainError::already_exists("Device", hpbim));
        }

        let device = Device::new(hpbim, pidm, registered_by, ledger_precision(self.clock.now()));
        write_json(self.ledger.as_ref(), LedgerKey::Device(hpbim), &device).await?;

        info!(hpbim, pidm, registered_by, "Device registered");
        Ok(device)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Whether a device is registered under `hpbim`. Ledger failures are
    /// errors, never `false`.
    pub async fn exists(&self, hpbim: &str) -> DomainResult<bool> {
        if hpbim.is_empty() || reserved_prefix_of(hpbim).is_some() {
            return Ok(false);
        }
        Ok(self.ledger.get(&LedgerKey::Device(hpbim).to_string()).await?.is_some())
    }

    pub async fn read(&self, hpbim: &str) -> DomainResult<Device> {
        let missing = || DomainError::not_found("Device", "HPBIM", hpbim);
        if hpbim.is_empty() || reserved_prefix_of(hpbim).is_some() {
            return Err(missing());
        }
        read_json(self.ledger.as_ref(), LedgerKey::Device(hpbim))
            .await?
            .ok_or_else(missing)
    }

    /// Every unprefixed key in the ledger, decoded as a device, in key order.
    /// Entries that are not devices come back as failures.
    pub async fn scan_all(&self) -> DomainResult<Vec<ScanItem<Device>>> {
        let mut items = Vec::new();
        for entry in self.ledger.range_scan("", "").await? {
            let (key, value) = entry?;
            if reserved_prefix_of(&key).is_some() {
                continue;
            }
            items.push(
                serde_json::from_slice::<Device>(&value)
                    .map_err(|e| ScanFailure::new(key, e.to_string())),
            );
        }
        Ok(items)
    }

    /// Readable devices only. Empty when there are none.
    pub async fn list_all(&self) -> DomainResult<Vec<Device>> {
        Ok(successes(self.scan_all().await?))
    }
}
