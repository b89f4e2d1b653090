//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{rfc3339, DomainError};

/// User role. The set is closed; registration rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
    Patient,
    Device,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Doctor, Self::Patient, Self::Device];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Device => "device",
        }
    }

    /// Whether holders of this role may perform `capability`.
    pub fn permits(self, capability: Capability) -> bool {
        use Capability::*;
        use UserRole::*;

        match capability {
            RegisterDevice => true,
            AuthorHealthRecord => matches!(self, Doctor),
            ViewAllHealthRecords => matches!(self, Admin | Doctor),
            ViewOwnHealthRecords => matches!(self, Patient),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the role names.
impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}

/// Operations gated on the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    RegisterDevice,
    AuthorHealthRecord,
    ViewAllHealthRecords,
    ViewOwnHealthRecords,
}

/// User model as stored under `USER_<userId>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    #[serde(with = "rfc3339")]
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl User {
    /// A freshly registered, active user.
    pub fn new(
        user_id: impl Into<String>,
        role: UserRole,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            name: name.into(),
            email: email.into(),
            created_at,
            is_active: true,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role.permits(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_only_the_enumerated_roles() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!(matches!(
            "nurse".parse::<UserRole>(),
            Err(DomainError::InvalidRole(r)) if r == "nurse"
        ));
        assert!("Doctor".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn only_doctors_author_records() {
        assert!(UserRole::Doctor.permits(Capability::AuthorHealthRecord));
        for role in [UserRole::Admin, UserRole::Patient, UserRole::Device] {
            assert!(!role.permits(Capability::AuthorHealthRecord));
        }
    }

    #[test]
    fn every_role_registers_devices() {
        for role in UserRole::ALL {
            assert!(role.permits(Capability::RegisterDevice));
        }
    }

    #[test]
    fn record_visibility_by_role() {
        assert!(UserRole::Admin.permits(Capability::ViewAllHealthRecords));
        assert!(UserRole::Doctor.permits(Capability::ViewAllHealthRecords));
        assert!(!UserRole::Patient.permits(Capability::ViewAllHealthRecords));
        assert!(UserRole::Patient.permits(Capability::ViewOwnHealthRecords));
        assert!(!UserRole::Device.permits(Capability::ViewOwnHealthRecords));
        assert!(!UserRole::Device.permits(Capability::ViewAllHealthRecords));
    }

    #[test]
    fn serializes_with_ledger_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let user = User::new("doc1", UserRole::Doctor, "Dr A", "a@x.com", at);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "doc1",
                "role": "doctor",
                "name": "Dr A",
                "email": "a@x.com",
                "createdAt": "2024-01-02T03:04:05Z",
                "isActive": true
            })
        );
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
