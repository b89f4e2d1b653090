//! Ledger timestamp format
//!
//! Everything written to world state uses RFC 3339 at second precision in
//! UTC (`2024-05-01T10:00:00Z`). Older peers may have written local offsets
//! (`2024-05-01T12:00:00+02:00`). Those parse to the same instant but are
//! rendered back in UTC, so the string returned by a query can differ from
//! the stored one while the instant is unchanged.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Format a timestamp the way it is stored on the ledger.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp. Accepts any RFC 3339 offset and normalises to
/// UTC; the original offset is not kept.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Drop sub-second precision so in-memory values equal their stored form.
pub fn ledger_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

/// `#[serde(with = "rfc3339")]` adapter for `DateTime<Utc>` fields.
pub mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(*at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
