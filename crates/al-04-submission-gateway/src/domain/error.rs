//! Gateway error taxonomy.
//!
//! Every failure a caller can see carries an [`ErrorKind`] and a reason.
//! The kind decides the HTTP status a front door should use and whether the
//! call may be repeated.
//!
//! | Kind | Status | Retry | Meaning |
//! |------|--------|-------|---------|
//! | `ALREADY_EXISTS` | 400 | no | contract refused a create |
//! | `INVALID_ARGUMENT` | 400 | no | bad function, arity, amount or request |
//! | `NOT_FOUND` | 404 | no | no live asset under the id |
//! | `ENDORSEMENT_REJECTED` | by contract code | no | a peer refused a submit |
//! | `COMMIT_FAILED` | 500 | yes | ordered, then invalidated |
//! | `EVALUATE_TIMEOUT` / `ENDORSE_TIMEOUT` | 500 | yes | no side effects |
//! | `COMMIT_TIMEOUT` | 500 | no | outcome unknown, query before retrying |

use serde::{Deserialize, Serialize};
use shared_types::{ContractErrorCode, TxId, ValidationCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure category visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    DecodeError,
    StoreIoError,
    InvalidArgument,
    EndorsementRejected,
    CommitFailed,
    CommitTimeout,
    EvaluateTimeout,
    EndorseTimeout,
    Unavailable,
}

impl From<ContractErrorCode> for ErrorKind {
    fn from(code: ContractErrorCode) -> Self {
        match code {
            ContractErrorCode::AlreadyExists => ErrorKind::AlreadyExists,
            ContractErrorCode::NotFound => ErrorKind::NotFound,
            ContractErrorCode::DecodeError => ErrorKind::DecodeError,
            ContractErrorCode::StoreIoError => ErrorKind::StoreIoError,
            ContractErrorCode::InvalidArgument => ErrorKind::InvalidArgument,
        }
    }
}

/// Phase of a submit that ran out of time after the transaction may
/// already have reached the orderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitPhase {
    Submit,
    CommitStatus,
}

impl fmt::Display for CommitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitPhase::Submit => write!(f, "submit"),
            CommitPhase::CommitStatus => write!(f, "commit status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The contract refused an evaluation.
    #[error("{message}")]
    Contract {
        code: ContractErrorCode,
        message: String,
    },

    /// A peer refused to endorse a submit. Nothing was ordered.
    #[error("endorsement rejected: {message}")]
    EndorsementRejected {
        code: ContractErrorCode,
        message: String,
    },

    /// The transaction was ordered but invalidated at commit.
    #[error("transaction {tx_id} failed to commit with status {code}")]
    CommitFailed { tx_id: TxId, code: ValidationCode },

    #[error("evaluate timed out after {0:?}")]
    EvaluateTimeout(Duration),

    #[error("endorsement timed out after {0:?}")]
    EndorseTimeout(Duration),

    /// Budget exhausted after the transaction may have been ordered.
    #[error("transaction {tx_id} timed out in {phase} after {budget:?}, outcome unknown")]
    CommitTimeout {
        tx_id: TxId,
        phase: CommitPhase,
        budget: Duration,
    },

    /// The orderer refused the transaction. Nothing was ordered.
    #[error("orderer rejected transaction: {0}")]
    OrdererRejected(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to decode result: {0}")]
    Decode(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Contract { code, .. } => (*code).into(),
            GatewayError::EndorsementRejected { .. } => ErrorKind::EndorsementRejected,
            GatewayError::CommitFailed { .. } => ErrorKind::CommitFailed,
            GatewayError::EvaluateTimeout(_) => ErrorKind::EvaluateTimeout,
            GatewayError::EndorseTimeout(_) => ErrorKind::EndorseTimeout,
            GatewayError::CommitTimeout { .. } => ErrorKind::CommitTimeout,
            GatewayError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GatewayError::Decode(_) => ErrorKind::DecodeError,
            GatewayError::OrdererRejected(_) | GatewayError::Unavailable(_) => {
                ErrorKind::Unavailable
            }
        }
    }

    /// Contract error code behind this failure, if the contract raised it.
    pub fn contract_code(&self) -> Option<ContractErrorCode> {
        match self {
            GatewayError::Contract { code, .. }
            | GatewayError::EndorsementRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Status an HTTP front door should answer with.
    pub fn http_status(&self) -> u16 {
        let kind = self
            .contract_code()
            .map(ErrorKind::from)
            .unwrap_or_else(|| self.kind());
        match kind {
            ErrorKind::AlreadyExists | ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            _ => 500,
        }
    }

    /// True when repeating the same call cannot apply it twice.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::CommitFailed { .. }
                | GatewayError::EvaluateTimeout(_)
                | GatewayError::EndorseTimeout(_)
                | GatewayError::OrdererRejected(_)
        )
    }

    /// True when the transaction may or may not have committed.
    pub fn outcome_unknown(&self) -> bool {
        matches!(self, GatewayError::CommitTimeout { .. })
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            reason: self.to_string(),
        }
    }
}

/// Serializable error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub reason: String,
}
