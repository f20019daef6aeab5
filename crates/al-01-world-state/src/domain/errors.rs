use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Store I/O error: {0}")]
    Io(String),

    #[error("World state lock poisoned")]
    LockPoisoned,

    #[error("Invalid key: {reason}")]
    InvalidKey { reason: &'static str },
}

impl StateError {
    pub(crate) fn empty_key() -> Self {
        StateError::InvalidKey {
            reason: "key must not be empty",
        }
    }
}

/// Reject keys the store cannot hold.
pub fn validate_key(key: &str) -> Result<(), StateError> {
    if key.is_empty() {
        return Err(StateError::empty_key());
    }
    Ok(())
}
