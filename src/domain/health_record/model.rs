//! Health record entities
//!
//! `HealthRecord` is what lives on the ledger: metadata in the clear and the
//! clinical payload (`HealthData`) as base64 ciphertext plus nonce.
//! `HealthRecordView` is the flat projection queries hand back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::rfc3339;

/// Stored under `HEALTH_RECORD_<recordId>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub record_id: String,
    #[serde(rename = "deviceHpbm")]
    pub device_hpbim: String,
    pub patient_id: String,
    /// Doctor who created the record
    pub doctor_id: String,
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub encrypted_data: String,
    pub nonce: String,
}

/// Clinical payload. Only ever persisted encrypted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub heart_rate: i64,
    pub blood_pressure: String,
    pub temperature: f64,
    pub oxygen_level: f64,
    pub notes: String,
}

/// Decrypted, flattened record as returned by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordView {
    pub record_id: String,
    #[serde(rename = "deviceHpbm")]
    pub device_hpbim: String,
    pub patient_id: String,
    pub doctor_id: String,
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub heart_rate: i64,
    pub blood_pressure: String,
    pub temperature: f64,
    pub oxygen_level: f64,
    pub notes: String,
    /// Always true: the record was stored encrypted.
    pub encrypted: bool,
}

impl HealthRecordView {
    pub fn from_parts(record: HealthRecord, data: HealthData) -> Self {
        Self {
            record_id: record.record_id,
            device_hpbim: record.device_hpbim,
            patient_id: record.patient_id,
            doctor_id: record.doctor_id,
            timestamp: record.timestamp,
            heart_rate: data.heart_rate,
            blood_pressure: data.blood_pressure,
            temperature: data.temperature,
            oxygen_level: data.oxygen_level,
            notes: data.notes,
            encrypted: true,
        }
    }
}
