//! Contract transaction handler
//!
//! Takes a function name plus positional string arguments (the shape the
//! gateway submits), dispatches to the matching handler and returns the
//! JSON result. Every call is timed and counted through the `metrics` facade.

use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{action_matcher, Function};
use crate::application::devices::DeviceRegistry;
use crate::application::identity::IdentityRegistry;
use crate::application::records::{RecordQuery, RecordStore};
use crate::application::session::SessionManager;
use crate::domain::{Clock, DomainError, DomainResult, Ledger};
use crate::infrastructure::crypto::{CipherKey, MaskCipher};

/// Immutable settings the services are built with.
#[derive(Debug, Clone)]
pub struct ContractSettings {
    pub key: CipherKey,
    pub session_ttl: Duration,
}

impl ContractSettings {
    pub fn new(key: CipherKey, session_ttl: Duration) -> Self {
        Self { key, session_ttl }
    }
}

/// Error as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub transient: bool,
}

impl From<&DomainError> for ErrorEnvelope {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            transient: err.is_transient(),
        }
    }
}

fn record_transaction(function: &'static str, outcome: &'static str, start: Instant) {
    let duration = start.elapsed().as_secs_f64();
    metrics::histogram!("contract_transaction_latency_seconds", "function" => function)
        .record(duration);
    metrics::counter!("contract_transactions_total", "function" => function, "outcome" => outcome)
        .increment(1);
}

/// The contract: every service wired to one ledger and clock.
pub struct ContractHandler {
    pub identity: Arc<IdentityRegistry>,
    pub sessions: SessionManager,
    pub devices: Arc<DeviceRegistry>,
    pub records: RecordStore,
    pub queries: RecordQuery,
}

impl ContractHandler {
    pub fn new(ledger: Arc<dyn Ledger>, clock: Arc<dyn Clock>, settings: ContractSettings) -> Self {
        let cipher = MaskCipher::new(settings.key);
        let identity = Arc::new(IdentityRegistry::new(ledger.clone(), clock.clone()));
        let devices = Arc::new(DeviceRegistry::new(
            ledger.clone(),
            identity.clone(),
            clock.clone(),
        ));

        Self {
            sessions: SessionManager::new(
                ledger.clone(),
                identity.clone(),
                clock.clone(),
                settings.session_ttl,
            ),
            records: RecordStore::new(
                ledger.clone(),
                identity.clone(),
                devices.clone(),
                cipher.clone(),
                clock,
            ),
            queries: RecordQuery::new(ledger, cipher),
            identity,
            devices,
        }
    }

    /// Run one named transaction.
    pub async fn invoke(&self, function: &str, args: &[String]) -> DomainResult<Value> {
        let start = Instant::now();
        let function: Function = match function.parse() {
            Ok(f) => f,
            Err(e) => {
                warn!(function, "Unknown contract function");
                record_transaction("unknown", "UNKNOWN_FUNCTION", start);
                return Err(e);
            }
        };

        let result = action_matcher(self, function, args).await;

        match &result {
            Ok(_) => {
                record_transaction(function.as_str(), "ok", start);
                info!(function = function.as_str(), "Transaction completed");
            }
            Err(e) => {
                record_transaction(function.as_str(), e.code(), start);
                warn!(
                    function = function.as_str(),
                    code = e.code(),
                    error = %e,
                    "Transaction rejected"
                );
            }
        }

        result
    }

    /// Like [`invoke`](Self::invoke) with the error flattened to its envelope.
    pub async fn invoke_enveloped(&self, function: &str, args: &[String]) -> Result<Value, ErrorEnvelope> {
        self.invoke(function, args)
            .await
            .map_err(|e| ErrorEnvelope::from(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ledger::{FailingLedger, FailureMode};
    use crate::infrastructure::{InMemoryLedger, ManualClock};
    use chrono::Utc;

    fn handler(ledger: Arc<dyn Ledger>) -> ContractHandler {
        let settings = ContractSettings::new(CipherKey::new("k").unwrap(), Duration::hours(24));
        ContractHandler::new(ledger, Arc::new(ManualClock::new(Utc::now())), settings)
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn writes_return_null_and_reads_return_entities() {
        let h = handler(Arc::new(InMemoryLedger::new()));

        let out = h
            .invoke("RegisterUser", &args(&["doc1", "doctor", "Dr A", "a@x.com"]))
            .await
            .unwrap();
        assert_eq!(out, Value::Null);

        let user = h.invoke("GetUser", &args(&["doc1"])).await.unwrap();
        assert_eq!(user["role"], "doctor");

        assert_eq!(
            h.invoke("DeviceExists", &args(&["HP1"])).await.unwrap(),
            Value::Bool(false)
        );
        assert_eq!(h.invoke("GetAllAssets", &[]).await.unwrap(), serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_calls_are_rejected() {
        let h = handler(Arc::new(InMemoryLedger::new()));

        assert!(matches!(
            h.invoke("DropTable", &[]).await,
            Err(DomainError::UnknownFunction(_))
        ));
        assert!(matches!(
            h.invoke("GetUser", &[]).await,
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            h.invoke(
                "AddHealthRecord",
                &args(&["R1", "HP1", "p1", "doc1", "fast", "120/80", "36.6", "98", ""])
            )
            .await,
            Err(DomainError::InvalidArgument(m)) if m.contains("heartRate")
        ));
    }

    #[tokio::test]
    async fn envelope_carries_code_and_transience() {
        let h = handler(Arc::new(FailingLedger(FailureMode::Unavailable)));
        let envelope = h.invoke_enveloped("GetUser", &args(&["u1"])).await.unwrap_err();
        assert_eq!(envelope.code, "LEDGER_ERROR");
        assert!(envelope.transient);

        let h = handler(Arc::new(InMemoryLedger::new()));
        let envelope = h.invoke_enveloped("GetUser", &args(&["u1"])).await.unwrap_err();
        assert_eq!(envelope.code, "NOT_FOUND");
        assert!(!envelope.transient);
        assert!(envelope.message.contains("u1"));
    }
}
