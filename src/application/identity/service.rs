//! Identity registry: user registration and lookup

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::state::{contains, read_json, write_json};
use crate::domain::{Clock, DomainError, DomainResult, Ledger, LedgerKey, User, UserRole};
use crate::shared::{ledger_precision, require_non_empty};

/// Owns the `USER_` namespace. Users are written once and never updated.
pub struct IdentityRegistry {
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
}

impl IdentityRegistry {
    pub fn new(ledger: Arc<dyn Ledger>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Register a new active user.
    ///
    /// The role is checked before existence, so an invalid role is reported
    /// even for a taken id.
    pub async fn register(
        &self,
        user_id: &str,
        role: &str,
        name: &str,
        email: &str,
    ) -> DomainResult<User> {
        require_non_empty("userId", user_id)?;
        let role: UserRole = role.parse()?;

        if contains(self.ledger.as_ref(), LedgerKey::User(user_id)).await? {
            warn!(user_id, "Rejected duplicate user registration");
            return Err(DomainError::already_exists("User", user_id));
        }

        let user = User::new(user_id, role, name, email, ledger_precision(self.clock.now()));
        write_json(self.ledger.as_ref(), LedgerKey::User(user_id), &user).await?;

        info!(user_id, role = %role, "User registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn lookup(&self, user_id: &str) -> DomainResult<User> {
        read_json(self.ledger.as_ref(), LedgerKey::User(user_id))
            .await?
            .ok_or_else(|| DomainError::not_found("User", "userId", user_id))
    }

    /// Like [`lookup`](Self::lookup), but an inactive account fails `Inactive`.
    pub async fn lookup_active(&self, user_id: &str) -> DomainResult<User> {
        let user = self.lookup(user_id).await?;
        if !user.is_active {
            return Err(DomainError::Inactive(user_id.to_string()));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ledger::{FailingLedger, FailureMode};
    use crate::infrastructure::{InMemoryLedger, ManualClock};
    use crate::shared::LedgerError;
    use chrono::{TimeZone, Utc};

    fn registry() -> (IdentityRegistry, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        ));
        (IdentityRegistry::new(ledger.clone(), clock), ledger)
    }

    #[tokio::test]
    async fn register_persists_an_active_user() {
        let (registry, ledger) = registry();

        let user = registry.register("doc1", "doctor", "Dr A", "a@x.com").await.unwrap();
        assert!(user.is_active);
        assert_eq!(user.role, UserRole::Doctor);

        let raw = ledger.get("USER_doc1").await.unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(stored["userId"], "doc1");
        assert_eq!(stored["role"], "doctor");
        assert_eq!(stored["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(stored["isActive"], true);

        assert_eq!(registry.lookup("doc1").await.unwrap(), user);
    }

    #[tokio::test]
    async fn second_registration_is_rejected() {
        let (registry, _) = registry();
        registry.register("u1", "patient", "P", "p@x.com").await.unwrap();

        let err = registry.register("u1", "admin", "Other", "o@x.com").await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists { entity: "User", .. }));
        assert_eq!(registry.lookup("u1").await.unwrap().role, UserRole::Patient);
    }

    #[tokio::test]
    async fn unknown_role_is_rejected_before_existence() {
        let (registry, ledger) = registry();
        assert!(matches!(
            registry.register("n1", "nurse", "N", "n@x.com").await,
            Err(DomainError::InvalidRole(r)) if r == "nurse"
        ));
        assert!(ledger.is_empty());

        registry.register("u1", "patient", "P", "p@x.com").await.unwrap();
        assert!(matches!(
            registry.register("u1", "nurse", "P", "p@x.com").await,
            Err(DomainError::InvalidRole(_))
        ));
    }

    #[tokio::test]
    async fn lookup_of_missing_user_is_not_found() {
        let (registry, _) = registry();
        assert!(matches!(
            registry.lookup("ghost").await,
            Err(DomainError::NotFound { entity: "User", field: "userId", value }) if value == "ghost"
        ));
    }

    #[tokio::test]
    async fn inactive_user_fails_active_lookup() {
        let (registry, ledger) = registry();
        let mut user = User::new("u2", UserRole::Patient, "P", "p@x.com", Utc::now());
        user.is_active = false;
        ledger.insert_raw("USER_u2", serde_json::to_vec(&user).unwrap());

        assert!(registry.lookup("u2").await.is_ok());
        assert!(matches!(
            registry.lookup_active("u2").await,
            Err(DomainError::Inactive(id)) if id == "u2"
        ));
    }

    #[tokio::test]
    async fn ledger_failures_propagate() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let registry = IdentityRegistry::new(Arc::new(FailingLedger(FailureMode::Read)), clock);

        assert!(matches!(
            registry.lookup("u1").await,
            Err(DomainError::Ledger(LedgerError::Read(_)))
        ));
        assert!(matches!(
            registry.register("u1", "admin", "A", "a@x.com").await,
            Err(DomainError::Ledger(LedgerError::Read(_)))
        ));
    }

    #[tokio::test]
    async fn failed_put_surfaces_as_write_error() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let registry = IdentityRegistry::new(Arc::new(FailingLedger(FailureMode::Write)), clock);

        assert!(matches!(
            registry.register("u1", "admin", "A", "a@x.com").await,
            Err(DomainError::Ledger(LedgerError::Write(_)))
        ));
    }
}
