//! # BioMTAKE ledger contract
//!
//! Identities, login sessions, IoMT devices and encrypted health records kept
//! in a versioned key-value ledger.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, key namespaces and the ledger / clock ports
//! - **application**: registries, record store and queries, and the
//!   contract handler that routes named transactions to them
//! - **infrastructure**: in-memory ledger with snapshot files, clocks,
//!   payload cipher
//! - **shared**: errors, timestamps, argument validation
//! - **config** / **runtime**: TOML configuration, tracing setup and the
//!   bootstrap used by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use application::{ContractHandler, ContractSettings, ErrorEnvelope, Function};
pub use domain::{DomainError, DomainResult};
pub use runtime::{init_tracing, RuntimeError, RuntimeHandle, RuntimeOptions};
