//! Named contract transactions

use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Every transaction the contract answers to, by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    RegisterUser,
    GetUser,
    CreateSession,
    ValidateSession,
    CreateAsset,
    AddHealthRecord,
    ReadAsset,
    DeviceExists,
    GetAllAssets,
    GetHealthRecordsByPatient,
    GetAllHealthRecords,
    GetHealthRecordsForSession,
}

impl Function {
    pub const ALL: [Function; 12] = [
        Self::RegisterUser,
        Self::GetUser,
        Self::CreateSession,
        Self::ValidateSession,
        Self::CreateAsset,
        Self::AddHealthRecord,
        Self::ReadAsset,
        Self::DeviceExists,
        Self::GetAllAssets,
        Self::GetHealthRecordsByPatient,
        Self::GetAllHealthRecords,
        Self::GetHealthRecordsForSession,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterUser => "RegisterUser",
            Self::GetUser => "GetUser",
            Self::CreateSession => "CreateSession",
            Self::ValidateSession => "ValidateSession",
            Self::CreateAsset => "CreateAsset",
            Self::AddHealthRecord => "AddHealthRecord",
            Self::ReadAsset => "ReadAsset",
            Self::DeviceExists => "DeviceExists",
            Self::GetAllAssets => "GetAllAssets",
            Self::GetHealthRecordsByPatient => "GetHealthRecordsByPatient",
            Self::GetAllHealthRecords => "GetAllHealthRecords",
            Self::GetHealthRecordsForSession => "GetHealthRecordsForSession",
        }
    }

    /// Argument names, in submission order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Self::RegisterUser => &["userId", "role", "name", "email"],
            Self::GetUser | Self::CreateSession => &["userId"],
            Self::ValidateSession | Self::GetHealthRecordsForSession => &["sessionId"],
            Self::CreateAsset => &["HPBIM", "PIDM", "registeredBy"],
            Self::AddHealthRecord => &[
                "recordId",
                "deviceHpbm",
                "patientId",
                "doctorId",
                "heartRate",
                "bloodPressure",
                "temperature",
                "oxygenLevel",
                "notes",
            ],
            Self::ReadAsset | Self::DeviceExists => &["HPBIM"],
            Self::GetHealthRecordsByPatient => &["patientId"],
            Self::GetAllAssets | Self::GetAllHealthRecords => &[],
        }
    }

    /// Whether a successful call changes world state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::RegisterUser | Self::CreateSession | Self::CreateAsset | Self::AddHealthRecord
        )
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFunction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for function in Function::ALL {
            assert_eq!(function.as_str().parse::<Function>().unwrap(), function);
        }
        assert!(matches!(
            "DeleteUser".parse::<Function>(),
            Err(DomainError::UnknownFunction(name)) if name == "DeleteUser"
        ));
        assert!("registeruser".parse::<Function>().is_err());
    }

    #[test]
    fn add_health_record_takes_nine_arguments() {
        assert_eq!(Function::AddHealthRecord.params().len(), 9);
        assert!(Function::GetAllAssets.params().is_empty());
    }

    #[test]
    fn only_mutations_are_writes() {
        let writes: Vec<_> = Function::ALL.into_iter().filter(Function::is_write).collect();
        assert_eq!(
            writes,
            vec![
                Function::RegisterUser,
                Function::CreateSession,
                Function::CreateAsset,
                Function::AddHealthRecord,
            ]
        );
    }
}
