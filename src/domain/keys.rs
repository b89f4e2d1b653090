//! World-state key namespaces
//!
//! All entities share one flat keyspace. Users, sessions and health records
//! carry a type prefix; devices are stored under their bare HPBIM. Device
//! ids therefore must not start with any reserved prefix, otherwise a device
//! could shadow (or be shadowed by) another entity type.

use std::fmt;

use crate::shared::{DomainError, DomainResult};

pub const USER_PREFIX: &str = "USER_";
pub const SESSION_PREFIX: &str = "SESSION_";
pub const HEALTH_RECORD_PREFIX: &str = "HEALTH_RECORD_";

/// Leading marker the record scan matches on. Thirteen characters, without
/// the trailing underscore, so this is also what device ids may not start with.
pub const HEALTH_RECORD_MARKER: &str = "HEALTH_RECORD";

pub const RESERVED_PREFIXES: [&str; 3] = [USER_PREFIX, SESSION_PREFIX, HEALTH_RECORD_MARKER];

/// A typed world-state key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKey<'a> {
    User(&'a str),
    Session(&'a str),
    Device(&'a str),
    HealthRecord(&'a str),
}

impl fmt::Display for LedgerKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{USER_PREFIX}{id}"),
            Self::Session(id) => write!(f, "{SESSION_PREFIX}{id}"),
            Self::Device(hpbim) => f.write_str(hpbim),
            Self::HealthRecord(id) => write!(f, "{HEALTH_RECORD_PREFIX}{id}"),
        }
    }
}

/// True for keys the record scan treats as health records: longer than the
/// marker and starting with it.
pub fn is_health_record_key(key: &str) -> bool {
    key.len() > HEALTH_RECORD_MARKER.len() && key.starts_with(HEALTH_RECORD_MARKER)
}

/// The reserved prefix `key` falls under, if any.
pub fn reserved_prefix_of(key: &str) -> Option<&'static str> {
    RESERVED_PREFIXES
        .iter()
        .copied()
        .find(|prefix| key.starts_with(prefix))
}

/// A device id must be non-empty and live outside every reserved namespace.
pub fn validate_device_id(hpbim: &str) -> DomainResult<()> {
    if hpbim.is_empty() {
        return Err(DomainError::InvalidArgument("HPBIM must not be empty".into()));
    }
    if let Some(prefix) = reserved_prefix_of(hpbim) {
        return Err(DomainError::ReservedPrefix {
            id: hpbim.to_string(),
            prefix,
        });
    }
    Ok(())
}
