//! Login session entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{rfc3339, DomainError, DomainResult};

/// Observable session state. `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Valid,
    Expired,
}

/// Session as stored under `SESSION_<sessionId>`. Never mutated after issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    #[serde(with = "rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "rfc3339")]
    pub expires_at: DateTime<Utc>,
    pub is_valid: bool,
}

impl Session {
    pub fn issue(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> DomainResult<Self> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            DomainError::InvalidArgument(format!("session lifetime of {ttl} is out of range"))
        })?;
        Ok(Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            created_at: now,
            expires_at,
            is_valid: true,
        })
    }

    /// Valid while `now <= expires_at` and the flag is set.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if !self.is_valid || now > self.expires_at {
            SessionState::Expired
        } else {
            SessionState::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> Session {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Session::issue("tok", "u1", now, Duration::hours(24)).unwrap()
    }

    #[test]
    fn expires_one_ttl_after_issue() {
        let s = issued();
        assert_eq!(s.expires_at - s.created_at, Duration::hours(24));
        assert!(s.is_valid);
    }

    #[test]
    fn valid_up_to_and_including_expiry() {
        let s = issued();
        assert_eq!(s.state_at(s.created_at), SessionState::Valid);
        assert_eq!(s.state_at(s.expires_at), SessionState::Valid);
        assert_eq!(
            s.state_at(s.expires_at + Duration::seconds(1)),
            SessionState::Expired
        );
    }

    #[test]
    fn lifetime_past_the_calendar_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert!(matches!(
            Session::issue("tok", "u1", now, Duration::MAX),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn invalid_flag_wins_over_time() {
        let mut s = issued();
        s.is_valid = false;
        assert_eq!(s.state_at(s.created_at), SessionState::Expired);
    }
}
