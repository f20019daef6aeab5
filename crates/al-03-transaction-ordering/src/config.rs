//! Configuration for the ordering service.

use crate::domain::errors::OrderingError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordering configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Channel whose transactions this orderer accepts
    pub channel: String,
    /// Cut a block once this many transactions are queued
    pub max_message_count: usize,
    /// Cut a block this long after its first transaction arrived
    pub batch_timeout_ms: u64,
    /// Capacity of the broadcast queue; a full queue rejects submissions
    pub queue_capacity: usize,
    /// How long a commit status stays queryable after its block commits
    pub status_retention_ms: u64,
    /// How often expired statuses and abandoned waiters are swept
    pub cleanup_interval_ms: u64,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            channel: "mychannel".to_string(),
            max_message_count: 10,
            batch_timeout_ms: 250,
            queue_capacity: 1000,
            status_retention_ms: 300_000,
            cleanup_interval_ms: 30_000,
        }
    }
}

impl OrderingConfig {
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_millis(self.batch_timeout_ms)
    }

    pub fn status_retention(&self) -> Duration {
        Duration::from_millis(self.status_retention_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    pub fn validate(&self) -> Result<(), OrderingError> {
        if self.max_message_count == 0 {
            return Err(OrderingError::InvalidConfig(
                "max_message_count cannot be 0".into(),
            ));
        }
        if self.batch_timeout_ms == 0 {
            return Err(OrderingError::InvalidConfig(
                "batch_timeout_ms cannot be 0".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(OrderingError::InvalidConfig("queue_capacity cannot be 0".into()));
        }
        if self.cleanup_interval_ms == 0 {
            return Err(OrderingError::InvalidConfig(
                "cleanup_interval_ms cannot be 0".into(),
            ));
        }
        if self.status_retention_ms < self.batch_timeout_ms {
            return Err(OrderingError::InvalidConfig(
                "status_retention_ms must cover at least one batch_timeout_ms".into(),
            ));
        }
        Ok(())
    }
}
