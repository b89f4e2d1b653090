//! Health record aggregate

pub mod model;

pub use model::{HealthData, HealthRecord, HealthRecordView};
