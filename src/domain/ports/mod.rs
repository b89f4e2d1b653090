//! Domain ports (hexagonal architecture boundaries)
//!
//! Outbound contracts the services depend on; adapters live in
//! `infrastructure`.

pub mod clock;
pub mod ledger;

pub use clock::Clock;
pub use ledger::{Ledger, LedgerEntry, LedgerScan};
