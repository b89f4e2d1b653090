use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {entity} {value}")]
    AlreadyExists { entity: &'static str, value: String },

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("User is not a doctor: {0}")]
    NotDoctor(String),

    #[error("User account is inactive: {0}")]
    Inactive(String),

    #[error("Session expired or invalid: {0}")]
    Expired(String),

    #[error("IoMT device does not exist: {0}")]
    DeviceNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Device id {id} collides with reserved namespace {prefix}")]
    ReservedPrefix { id: String, prefix: &'static str },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn already_exists(entity: &'static str, value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            value: value.into(),
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::NotDoctor(_) => "NOT_DOCTOR",
            Self::Inactive(_) => "INACTIVE",
            Self::Expired(_) => "EXPIRED",
            Self::DeviceNotFound(_) => "DEVICE_NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::ReservedPrefix { .. } => "RESERVED_PREFIX",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Ledger(_) => "LEDGER_ERROR",
        }
    }

    /// Whether the caller may succeed by resubmitting the same transaction.
    /// The core itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Ledger(LedgerError::Conflict(_) | LedgerError::Unavailable(_))
        )
    }
}

/// Failures reported by the ledger collaborator.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read from world state: {0}")]
    Read(String),

    #[error("failed to write to world state: {0}")]
    Write(String),

    #[error("write conflict on key {0}")]
    Conflict(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot format error: {0}")]
    Snapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_key() {
        let err = DomainError::not_found("User", "userId", "doc1");
        assert_eq!(err.to_string(), "Not found: User with userId=doc1");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn ledger_errors_convert_and_keep_code() {
        let err: DomainError = LedgerError::Read("disk gone".into()).into();
        assert_eq!(err.code(), "LEDGER_ERROR");
        assert!(!err.is_transient());

        let conflict: DomainError = LedgerError::Conflict("USER_a".into()).into();
        assert!(conflict.is_transient());
    }

    #[test]
    fn domain_rejections_are_not_transient() {
        assert!(!DomainError::NotDoctor("p1".into()).is_transient());
        assert!(!DomainError::Expired("s".into()).is_transient());
    }
}
