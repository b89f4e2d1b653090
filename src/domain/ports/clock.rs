use chrono::{DateTime, Utc};

/// Source of "now" for timestamps and session expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
