//! Configuration module
//!
//! TOML file with three sections, every field optional:
//!
//! ```toml
//! [security]
//! encryption_key = "..."
//! session_ttl_hours = 24
//!
//! [ledger]
//! snapshot_path = "/var/lib/biomtake/ledger.json"
//!
//! [logging]
//! level = "info"
//! format = "text"   # or "json"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{ContractSettings, DEFAULT_SESSION_TTL_HOURS};
use crate::infrastructure::crypto::{CipherKey, LEGACY_ENCRYPTION_KEY};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "BIOMTAKE_CONFIG";
/// Overrides `security.encryption_key`.
pub const ENCRYPTION_KEY_ENV: &str = "BIOMTAKE_ENCRYPTION_KEY";
/// Upper bound for `security.session_ttl_hours` (100 years).
pub const MAX_SESSION_TTL_HOURS: i64 = 100 * 365 * 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared key for record payloads. Never logged.
    pub encryption_key: String,
    pub session_ttl_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            encryption_key: LEGACY_ENCRYPTION_KEY.to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("encryption_key", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// World-state snapshot used by the CLI. Defaults to the user data dir.
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub security: SecurityConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// [`load`](Self::load), treating a missing file as all defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = toml::to_string_pretty(self)?;
        fs::write(path, body).map_err(io_err)
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENCRYPTION_KEY_ENV) {
            self.security.encryption_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.encryption_key.is_empty() {
            return Err(ConfigError::Invalid(
                "security.encryption_key must not be empty".into(),
            ));
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.security.session_ttl_hours) {
            return Err(ConfigError::Invalid(format!(
                "security.session_ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}, got {}",
                self.security.session_ttl_hours
            )));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"text\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }

    pub fn cipher_key(&self) -> Result<CipherKey, ConfigError> {
        CipherKey::new(self.security.encryption_key.as_bytes())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn session_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_hours(self.security.session_ttl_hours).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "security.session_ttl_hours is out of range: {}",
                self.security.session_ttl_hours
            ))
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.ledger
            .snapshot_path
            .clone()
            .unwrap_or_else(default_snapshot_path)
    }

    /// Validated settings for the contract services.
    pub fn contract_settings(&self) -> Result<ContractSettings, ConfigError> {
        self.validate()?;
        Ok(ContractSettings::new(self.cipher_key()?, self.session_ttl()?))
    }

    /// True while the shipped key is in use.
    pub fn uses_legacy_key(&self) -> bool {
        self.security.encryption_key == LEGACY_ENCRYPTION_KEY
    }
}

/// `~/.config/biomtake/config.toml` (platform equivalent elsewhere).
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biomtake")
        .join("config.toml")
}

pub fn default_snapshot_path() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biomtake")
        .join("ledger.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_existing_records_readable() {
        let config = AppConfig::default();
        assert!(config.uses_legacy_key());
        assert_eq!(config.session_ttl().unwrap(), Duration::hours(24));
        assert_eq!(config.logging.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [security]
            session_ttl_hours = 8

            [ledger]
            snapshot_path = "/tmp/ledger.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.session_ttl().unwrap(), Duration::hours(8));
        assert_eq!(config.snapshot_path(), PathBuf::from("/tmp/ledger.json"));
        assert!(config.uses_legacy_key());
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn environment_overrides_the_key() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| (name == ENCRYPTION_KEY_ENV).then(|| "rotated".to_string()));
        assert_eq!(config.security.encryption_key, "rotated");
        assert!(!config.uses_legacy_key());

        config.apply_overrides(|_| None);
        assert_eq!(config.security.encryption_key, "rotated");
    }

    #[test]
    fn rejects_unusable_settings() {
        let mut config = AppConfig::default();
        config.security.encryption_key.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.contract_settings().is_err());

        let mut config = AppConfig::default();
        config.security.session_ttl_hours = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_session_ttl_is_rejected() {
        let mut config = AppConfig::default();
        config.security.session_ttl_hours = MAX_SESSION_TTL_HOURS;
        config.validate().unwrap();

        config.security.session_ttl_hours = MAX_SESSION_TTL_HOURS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.security.session_ttl_hours = 2_500_000_000;
        assert!(config.contract_settings().is_err());

        config.security.session_ttl_hours = i64::MAX;
        assert!(matches!(config.session_ttl(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let shown = format!("{:?}", AppConfig::default());
        assert!(!shown.contains(LEGACY_ENCRYPTION_KEY));
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("biomtake-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");
        let mut config = AppConfig::default();
        config.security.session_ttl_hours = 12;
        config.logging.format = "json".into();

        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.security.session_ttl_hours, 12);
        assert_eq!(loaded.logging.format, "json");

        assert!(matches!(
            AppConfig::load(&path.with_file_name("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
        assert!(AppConfig::load_or_default(&path.with_file_name("missing.toml")).is_ok());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
