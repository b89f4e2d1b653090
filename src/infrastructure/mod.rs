//! Infrastructure layer - adapters behind the domain ports

pub mod clock;
pub mod crypto;
pub mod ledger;

pub use clock::{ManualClock, SystemClock};
pub use crypto::{CipherKey, MaskCipher};
pub use ledger::InMemoryLedger;
