//! Gateway configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Channel the contract is deployed on
    pub channel: String,
    /// Contract name on that channel
    pub contract: String,
    /// Identity (MSP id) proposals are created under
    pub identity: String,
    /// Per-phase budgets
    pub timeouts: TimeoutConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            channel: "mychannel".to_string(),
            contract: "asset".to_string(),
            identity: "Org1MSP".to_string(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("channel", &self.channel),
            ("contract", &self.contract),
            ("identity", &self.identity),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} cannot be empty")));
            }
        }
        self.timeouts.validate()
    }
}

/// Time budgets, one per call phase.
///
/// `commit_status` is the not-to-exceed for a whole submit, measured from
/// the start of endorsement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    #[serde(with = "humantime_serde")]
    pub evaluate: Duration,
    #[serde(with = "humantime_serde")]
    pub endorse: Duration,
    #[serde(with = "humantime_serde")]
    pub submit: Duration,
    #[serde(with = "humantime_serde")]
    pub commit_status: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            evaluate: Duration::from_secs(5),
            endorse: Duration::from_secs(15),
            submit: Duration::from_secs(5),
            commit_status: Duration::from_secs(60),
        }
    }
}

impl TimeoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, budget) in [
            ("evaluate", self.evaluate),
            ("endorse", self.endorse),
            ("submit", self.submit),
            ("commit_status", self.commit_status),
        ] {
            if budget.is_zero() {
                return Err(ConfigError::InvalidTimeout(format!("{name} cannot be 0")));
            }
        }

        if self.endorse > self.commit_status {
            return Err(ConfigError::InvalidTimeout(
                "endorse cannot exceed commit_status".into(),
            ));
        }
        if self.submit > self.commit_status {
            return Err(ConfigError::InvalidTimeout(
                "submit cannot exceed commit_status".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parse `"250ms"`, `"5s"`, `"1m"` or plain seconds.
pub fn parse_duration(s: &str) -> Result<Duration, &'static str> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| "invalid milliseconds")
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| "invalid seconds")
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or("invalid minutes")
    } else {
        s.parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| "invalid duration format")
    }
}

/// Render a duration in the shortest exact unit `parse_duration` accepts.
pub fn format_duration(duration: &Duration) -> String {
    if duration.subsec_nanos() != 0 {
        format!("{}ms", duration.as_millis())
    } else if duration.as_secs() != 0 && duration.as_secs() % 60 == 0 {
        format!("{}m", duration.as_secs() / 60)
    } else {
        format!("{}s", duration.as_secs())
    }
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_duration(duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
