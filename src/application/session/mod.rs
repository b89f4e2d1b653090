//! Login sessions

pub mod service;

pub use service::{SessionManager, DEFAULT_SESSION_TTL_HOURS};
