//! Contract runtime over a snapshot-backed in-memory ledger.
//!
//! [`RuntimeHandle`] wires config, ledger, clock and the contract handler
//! together, so the CLI (and tests) can run transactions without repeating
//! the bootstrap.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::{ContractHandler, Function};
use crate::config::{AppConfig, ConfigError};
use crate::domain::{DomainResult, LedgerError};
use crate::infrastructure::{InMemoryLedger, SystemClock};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

// ── Options ────────────────────────────────────────────────────────

pub struct RuntimeOptions {
    pub config: AppConfig,
    /// Load the snapshot on open and write it back after each successful
    /// write transaction (default: true).
    pub persist: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            persist: true,
        }
    }
}

// ── RuntimeHandle ──────────────────────────────────────────────────

pub struct RuntimeHandle {
    pub contract: ContractHandler,
    pub config: AppConfig,
    ledger: Arc<InMemoryLedger>,
    snapshot_path: Option<PathBuf>,
}

impl RuntimeHandle {
    pub fn open(opts: RuntimeOptions) -> Result<Self, RuntimeError> {
        let config = opts.config;
        let settings = config.contract_settings()?;

        info!(key_fingerprint = %settings.key.fingerprint(), "Encryption key loaded");
        if config.uses_legacy_key() {
            warn!("Using the built-in legacy encryption key; set {} to rotate it", crate::config::ENCRYPTION_KEY_ENV);
        }

        let snapshot_path = opts.persist.then(|| config.snapshot_path());
        let ledger = match &snapshot_path {
            Some(path) => Arc::new(InMemoryLedger::load_snapshot(path)?),
            None => Arc::new(InMemoryLedger::new()),
        };

        let contract = ContractHandler::new(ledger.clone(), Arc::new(SystemClock), settings);
        Ok(Self {
            contract,
            config,
            ledger,
            snapshot_path,
        })
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    /// Run one transaction, persisting the snapshot after a successful write.
    pub async fn invoke(&self, function: &str, args: &[String]) -> DomainResult<Value> {
        let result = self.contract.invoke(function, args).await?;

        let is_write = function.parse::<Function>().map(|f| f.is_write()).unwrap_or(false);
        if let (true, Some(path)) = (is_write, &self.snapshot_path) {
            self.ledger.save_snapshot(path)?;
            debug!(function, path = %path.display(), "Snapshot persisted");
        }

        Ok(result)
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup. `RUST_LOG` wins over the config level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    // logs go to stderr so stdout carries only the transaction result
    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
