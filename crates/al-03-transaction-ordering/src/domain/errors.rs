//! Error types for transaction ordering

use al_01_world_state::StateError;
use thiserror::Error;

/// All errors that can occur in ordering and commit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// The broadcast queue is at capacity
    #[error("Ordering queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// The ordering service has stopped
    #[error("Ordering service closed")]
    Closed,

    /// The world state failed while committing
    #[error("Commit failed in world state: {0}")]
    Store(#[from] StateError),

    /// Rejected configuration
    #[error("Invalid ordering configuration: {0}")]
    InvalidConfig(String),
}
