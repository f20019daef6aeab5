//! # Error Types
//!
//! Failures of contract functions. Every variant carries enough text to be
//! shown to a caller as-is.

use al_01_world_state::StateError;
use shared_types::ContractErrorCode;
use thiserror::Error;

/// Errors raised by [`crate::AssetContract`] functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Create on a key that is already present.
    #[error("the asset {0} already exists")]
    AlreadyExists(String),

    /// Read, update or delete on an absent key.
    #[error("the asset {0} does not exist")]
    NotFound(String),

    /// A stored value could not be decoded, or a result could not be encoded.
    #[error("failed to decode asset {key}: {reason}")]
    Decode { key: String, reason: String },

    /// The world state failed underneath the contract.
    #[error("failed to access world state: {0}")]
    StoreIo(String),

    /// Unknown function, wrong arity or unparsable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ContractError {
    /// Wire category for this error.
    #[must_use]
    pub fn code(&self) -> ContractErrorCode {
        match self {
            ContractError::AlreadyExists(_) => ContractErrorCode::AlreadyExists,
            ContractError::NotFound(_) => ContractErrorCode::NotFound,
            ContractError::Decode { .. } => ContractErrorCode::DecodeError,
            ContractError::StoreIo(_) => ContractErrorCode::StoreIoError,
            ContractError::InvalidArgument(_) => ContractErrorCode::InvalidArgument,
        }
    }

    pub(crate) fn decode(key: &str, err: impl std::fmt::Display) -> Self {
        ContractError::Decode {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<StateError> for ContractError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidKey { reason } => ContractError::InvalidArgument(reason.to_string()),
            other => ContractError::StoreIo(other.to_string()),
        }
    }
}
