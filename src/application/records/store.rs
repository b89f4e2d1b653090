//! Record store: authoring encrypted health records

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::devices::DeviceRegistry;
use crate::application::identity::IdentityRegistry;
use crate::application::state::{contains, write_json};
use crate::domain::{
    Capability, Clock, DomainError, DomainResult, HealthData, HealthRecord, Ledger, LedgerKey,
};
use crate::infrastructure::crypto::MaskCipher;
use crate::shared::{ledger_precision, require_non_empty};

/// Input of [`RecordStore::add`]: record metadata plus the clinical payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AddHealthRecordDto {
    pub record_id: String,
    pub device_hpbim: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub data: HealthData,
}

pub struct RecordStore {
    ledger: Arc<dyn Ledger>,
    identity: Arc<IdentityRegistry>,
    devices: Arc<DeviceRegistry>,
    cipher: MaskCipher,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        identity: Arc<IdentityRegistry>,
        devices: Arc<DeviceRegistry>,
        cipher: MaskCipher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            identity,
            devices,
            cipher,
            clock,
        }
    }

    /// Encrypt and persist a new record.
    ///
    /// Checks run in order: author exists, author is a doctor, device is
    /// registered, record id is unused.
    pub async fn add(&self, dto: AddHealthRecordDto) -> DomainResult<HealthRecord> {
        require_non_empty("recordId", &dto.record_id)?;

        let author = self.identity.lookup(&dto.doctor_id).await?;
        if !author.can(Capability::AuthorHealthRecord) {
            warn!(doctor_id = %dto.doctor_id, role = %author.role, "Record author is not a doctor");
            return Err(DomainError::NotDoctor(dto.doctor_id));
        }

        if !self.devices.exists(&dto.device_hpbim).await? {
            return Err(DomainError::DeviceNotFound(dto.device_hpbim));
        }

        if contains(self.ledger.as_ref(), LedgerKey::HealthRecord(&dto.record_id)).await? {
            warn!(record_id = %dto.record_id, "Rejected duplicate record id");
            return Err(DomainError::Conflict(format!(
                "health record {} already exists",
                dto.record_id
            )));
        }

        let plaintext = serde_json::to_vec(&dto.data)?;
        let sealed = self.cipher.encrypt(&plaintext);

        let record = HealthRecord {
            record_id: dto.record_id,
            device_hpbim: dto.device_hpbim,
            patient_id: dto.patient_id,
            doctor_id: dto.doctor_id,
            timestamp: ledger_precision(self.clock.now()),
            encrypted_data: sealed.ciphertext,
            nonce: sealed.nonce,
        };
        write_json(
            self.ledger.as_ref(),
            LedgerKey::HealthRecord(&record.record_id),
            &record,
        )
        .await?;

        info!(
            record_id = %record.record_id,
            patient_id = %record.patient_id,
            hpbim = %record.device_hpbim,
            "Health record stored"
        );
        Ok(record)
    }
}
