//! Session manager: issues and validates login sessions

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use crate::application::identity::IdentityRegistry;
use crate::application::state::{read_json, write_json};
use crate::domain::{Clock, DomainError, DomainResult, Ledger, LedgerKey, Session, SessionState};
use crate::infrastructure::crypto::generate_session_id;
use crate::shared::ledger_precision;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

pub struct SessionManager {
    ledger: Arc<dyn Ledger>,
    identity: Arc<IdentityRegistry>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        identity: Arc<IdentityRegistry>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            ledger,
            identity,
            clock,
            ttl,
        }
    }

    /// Open a session for an existing, active user.
    pub async fn create(&self, user_id: &str) -> DomainResult<Session> {
        self.identity.lookup_active(user_id).await?;

        let now = ledger_precision(self.clock.now());
        let session = Session::issue(generate_session_id(), user_id, now, self.ttl)?;
        write_json(
            self.ledger.as_ref(),
            LedgerKey::Session(&session.session_id),
            &session,
        )
        .await?;

        info!(user_id, expires_at = %session.expires_at, "Session created");
        Ok(session)
    }

    /// Return the session if it is still valid. Read-only: validating never
    /// extends the expiry.
    pub async fn validate(&self, session_id: &str) -> DomainResult<Session> {
        let session: Session = read_json(self.ledger.as_ref(), LedgerKey::Session(session_id))
            .await?
            .ok_or_else(|| DomainError::not_found("Session", "sessionId", session_id))?;

        match session.state_at(self.clock.now()) {
            SessionState::Valid => Ok(session),
            SessionState::Expired => {
                debug!(user_id = %session.user_id, "Rejected expired session");
                Err(DomainError::Expired(session_id.to_string()))
            }
        }
    }
}
