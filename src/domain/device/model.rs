//! Monitoring device entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::rfc3339;

/// IoMT device, stored under its bare HPBIM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Hardware identifier (primary key)
    #[serde(rename = "HPBIM")]
    pub hpbim: String,
    /// Secondary identifier
    #[serde(rename = "PIDM")]
    pub pidm: String,
    #[serde(rename = "registeredAt", with = "rfc3339")]
    pub registered_at: DateTime<Utc>,
    /// User who registered the device
    #[serde(rename = "registeredBy")]
    pub registered_by: String,
}

impl Device {
    pub fn new(
        hpbim: impl Into<String>,
        pidm: impl Into<String>,
        registered_by: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            hpbim: hpbim.into(),
            pidm: pidm.into(),
            registered_at,
            registered_by: registered_by.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uses_upper_case_identifier_fields() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(Device::new("HP1", "PID1", "doc1", at)).unwrap();
        assert_eq!(json["HPBIM"], "HP1");
        assert_eq!(json["PIDM"], "PID1");
        assert_eq!(json["registeredAt"], "2024-06-01T00:00:00Z");
        assert_eq!(json["registeredBy"], "doc1");
    }

    #[test]
    fn other_entities_do_not_parse_as_devices() {
        let user = serde_json::json!({
            "userId": "doc1", "role": "doctor", "name": "Dr A",
            "email": "a@x.com", "createdAt": "2024-01-01T00:00:00Z", "isActive": true
        });
        assert!(serde_json::from_value::<Device>(user).is_err());
    }
}
