pub mod device;
pub mod health_record;
pub mod keys;
pub mod ports;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use device::Device;
pub use health_record::{HealthData, HealthRecord, HealthRecordView};
pub use keys::LedgerKey;
pub use ports::{Clock, Ledger, LedgerEntry, LedgerScan};
pub use session::{Session, SessionState};
pub use user::{Capability, User, UserRole};

// Re-export error types from shared for convenience
pub use crate::shared::types::{DomainError, DomainResult, LedgerError};
