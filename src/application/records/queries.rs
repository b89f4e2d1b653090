//! Record queries: scan, decrypt and project health records
//!
//! Both queries walk the whole keyspace and keep keys that look like health
//! records. Results follow ascending key order, so `R10` sorts before `R2`.

use std::sync::Arc;

use tracing::debug;

use crate::domain::keys::is_health_record_key;
use crate::domain::{DomainResult, HealthData, HealthRecord, HealthRecordView, Ledger};
use crate::infrastructure::crypto::MaskCipher;
use crate::shared::{successes, ScanFailure, ScanItem};

pub struct RecordQuery {
    ledger: Arc<dyn Ledger>,
    cipher: MaskCipher,
}

impl RecordQuery {
    pub fn new(ledger: Arc<dyn Ledger>, cipher: MaskCipher) -> Self {
        Self { ledger, cipher }
    }

    /// Every health record, each decrypted or reported as a failure.
    pub async fn scan_all(&self) -> DomainResult<Vec<ScanItem<HealthRecordView>>> {
        self.scan(None).await
    }

    /// Records of one patient. Entries whose metadata cannot be read are
    /// reported too, since their patient is unknown.
    pub async fn scan_by_patient(
        &self,
        patient_id: &str,
    ) -> DomainResult<Vec<ScanItem<HealthRecordView>>> {
        self.scan(Some(patient_id)).await
    }

    pub async fn all(&self) -> DomainResult<Vec<HealthRecordView>> {
        Ok(successes(self.scan_all().await?))
    }

    pub async fn by_patient(&self, patient_id: &str) -> DomainResult<Vec<HealthRecordView>> {
        Ok(successes(self.scan_by_patient(patient_id).await?))
    }

    async fn scan(&self, patient_id: Option<&str>) -> DomainResult<Vec<ScanItem<HealthRecordView>>> {
        let mut items = Vec::new();
        for entry in self.ledger.range_scan("", "").await? {
            let (key, value) = entry?;
            if !is_health_record_key(&key) {
                continue;
            }

            let record: HealthRecord = match serde_json::from_slice(&value) {
                Ok(record) => record,
                Err(e) => {
                    items.push(Err(ScanFailure::new(key, format!("record: {e}"))));
                    continue;
                }
            };
            if patient_id.is_some_and(|p| p != record.patient_id) {
                continue;
            }

            items.push(self.open(record).map_err(|reason| ScanFailure::new(key, reason)));
        }

        debug!(patient_id, matched = items.len(), "Scanned health records");
        Ok(items)
    }

    fn open(&self, record: HealthRecord) -> Result<HealthRecordView, String> {
        let plaintext = self
            .cipher
            .decrypt(&record.encrypted_data, &record.nonce)
            .map_err(|e| e.to_string())?;
        let data: HealthData =
            serde_json::from_slice(&plaintext).map_err(|e| format!("payload: {e}"))?;
        Ok(HealthRecordView::from_parts(record, data))
    }
}
