pub mod devices;
pub mod handlers;
pub mod identity;
pub mod records;
pub mod session;

mod state;

// Re-export key types for convenience
pub use devices::DeviceRegistry;
pub use handlers::{action_matcher, ContractHandler, ContractSettings, ErrorEnvelope, Function};
pub use identity::IdentityRegistry;
pub use records::{AddHealthRecordDto, RecordQuery, RecordStore};
pub use session::{SessionManager, DEFAULT_SESSION_TTL_HOURS};
