//! # Runtime Configuration
//!
//! One structure for every component, loaded in three layers:
//!
//! 1. Built-in defaults
//! 2. JSON file named by `AL_CONFIG` (missing keys keep their defaults)
//! 3. Individual environment variables
//!
//! | Variable | Field | Example |
//! |----------|-------|---------|
//! | `AL_LOG_LEVEL` | `log_level` | `debug`, `al_03_transaction_ordering=trace` |
//! | `AL_CHANNEL` | `gateway.channel` | `mychannel` |
//! | `AL_CONTRACT` | `gateway.contract` | `asset` |
//! | `AL_MSP_ID` | `gateway.identity` | `Org1MSP` |
//! | `AL_EVALUATE_TIMEOUT` | `gateway.timeouts.evaluate` | `5s` |
//! | `AL_ENDORSE_TIMEOUT` | `gateway.timeouts.endorse` | `15s` |
//! | `AL_SUBMIT_TIMEOUT` | `gateway.timeouts.submit` | `5s` |
//! | `AL_COMMIT_STATUS_TIMEOUT` | `gateway.timeouts.commit_status` | `1m` |
//! | `AL_BATCH_SIZE` | `ordering.max_message_count` | `10` |
//! | `AL_BATCH_TIMEOUT` | `ordering.batch_timeout_ms` | `250ms` |
//! | `AL_INIT_LEDGER` | `init_ledger` | `true` |

use al_03_transaction_ordering::{OrderingConfig, OrderingError};
use al_04_submission_gateway::{parse_duration, ConfigError as GatewayConfigError, GatewayConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// `EnvFilter` directive for the log subscriber.
    pub log_level: String,
    /// Seed the ledger with the initial dealers on start.
    pub init_ledger: bool,
    /// Channel, contract, identity and call budgets.
    pub gateway: GatewayConfig,
    /// Block cutting. Its channel always follows `gateway.channel`.
    pub ordering: OrderingConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            init_ledger: true,
            gateway: GatewayConfig::default(),
            ordering: OrderingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load defaults, then `AL_CONFIG`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`RuntimeConfig::load`] with an explicit variable source.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("AL_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.ordering.channel = config.gateway.channel.clone();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path,
            reason: e.to_string(),
        })
    }

    /// Override fields from individual variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(level) = lookup("AL_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(channel) = lookup("AL_CHANNEL") {
            self.gateway.channel = channel;
        }
        if let Some(contract) = lookup("AL_CONTRACT") {
            self.gateway.contract = contract;
        }
        if let Some(msp_id) = lookup("AL_MSP_ID") {
            self.gateway.identity = msp_id;
        }

        let timeouts = &mut self.gateway.timeouts;
        for (var, slot) in [
            ("AL_EVALUATE_TIMEOUT", &mut timeouts.evaluate),
            ("AL_ENDORSE_TIMEOUT", &mut timeouts.endorse),
            ("AL_SUBMIT_TIMEOUT", &mut timeouts.submit),
            ("AL_COMMIT_STATUS_TIMEOUT", &mut timeouts.commit_status),
        ] {
            if let Some(value) = lookup(var) {
                *slot = duration_var(var, &value)?;
            }
        }

        if let Some(value) = lookup("AL_BATCH_SIZE") {
            self.ordering.max_message_count =
                value.trim().parse().map_err(|_| invalid("AL_BATCH_SIZE", &value))?;
        }
        if let Some(value) = lookup("AL_BATCH_TIMEOUT") {
            let timeout = duration_var("AL_BATCH_TIMEOUT", &value)?;
            self.ordering.batch_timeout_ms = u64::try_from(timeout.as_millis())
                .map_err(|_| invalid("AL_BATCH_TIMEOUT", &value))?;
        }
        if let Some(value) = lookup("AL_INIT_LEDGER") {
            self.init_ledger = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid("AL_INIT_LEDGER", &value)),
            };
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;
        self.ordering.validate()?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("cannot parse config file {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid value {value:?} for {var}")]
    InvalidVar { var: &'static str, value: String },

    #[error(transparent)]
    Gateway(#[from] GatewayConfigError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidVar {
        var,
        value: value.to_string(),
    }
}

fn duration_var(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).map_err(|_| invalid(var, value))
}
