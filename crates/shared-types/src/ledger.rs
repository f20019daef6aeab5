//! # Ledger Plumbing
//!
//! Types that travel between the gateway, the endorsing peer, the orderer and
//! the committer:
//!
//! ```text
//! Proposal ──endorse──→ EndorsedTransaction { rw_set } ──order──→ block
//!                                                       ──commit──→ CommitStatus
//! ```

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of the random nonce mixed into every transaction id.
pub const NONCE_LEN: usize = 24;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Transaction identifier: hex SHA-256 of `nonce || creator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Derive the id from a proposal nonce and the creator identity.
    pub fn compute(nonce: &[u8], creator: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(creator.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap an already computed hex id.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 hex characters, for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Height at which a key was last written: block number and position of the
/// transaction inside that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub block_num: u64,
    pub tx_num: u64,
}

impl Version {
    pub const fn new(block_num: u64, tx_num: u64) -> Self {
        Self { block_num, tx_num }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_num, self.tx_num)
    }
}

// =============================================================================
// PROPOSAL
// =============================================================================

/// A signed request to run one contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub tx_id: TxId,
    pub channel: String,
    pub contract: String,
    pub function: String,
    pub args: Vec<String>,
    /// Identity of the submitting client (MSP id).
    pub creator: String,
    /// The only clock reading a transaction ever sees.
    pub timestamp: Timestamp,
}

impl Proposal {
    /// Build a proposal with a fresh nonce and the current time.
    pub fn new(
        channel: impl Into<String>,
        contract: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
        creator: impl Into<String>,
    ) -> Self {
        let creator = creator.into();
        let nonce: [u8; NONCE_LEN] = rand::random();
        Self {
            tx_id: TxId::compute(&nonce, &creator),
            channel: channel.into(),
            contract: contract.into(),
            function: function.into(),
            args,
            creator,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Replace the proposal timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

// =============================================================================
// READ / WRITE SET
// =============================================================================

/// A key read during simulation and the committed version observed.
///
/// `version` is `None` when the key did not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvRead {
    pub key: String,
    pub version: Option<Version>,
}

/// A range scan performed during simulation, with every key it returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQueryInfo {
    pub start_key: String,
    /// Exclusive. Empty means unbounded.
    pub end_key: String,
    pub reads: Vec<KvRead>,
}

/// A buffered write. Deletes carry no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvWrite {
    pub key: String,
    pub is_delete: bool,
    pub value: Vec<u8>,
}

impl KvWrite {
    pub fn put(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            is_delete: false,
            value,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_delete: true,
            value: Vec::new(),
        }
    }
}

/// Everything a simulation read and wants to write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    pub reads: Vec<KvRead>,
    pub range_queries: Vec<RangeQueryInfo>,
    pub writes: Vec<KvWrite>,
}

impl ReadWriteSet {
    /// True when the simulation wrote nothing.
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

/// A proposal together with its simulation results, ready for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsedTransaction {
    pub proposal: Proposal,
    pub rw_set: ReadWriteSet,
    /// Serialized contract result returned to the client.
    pub response_payload: Vec<u8>,
}

impl EndorsedTransaction {
    pub fn tx_id(&self) -> &TxId {
        &self.proposal.tx_id
    }
}

/// Category of a contract failure as reported by an endorsing peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractErrorCode {
    AlreadyExists,
    NotFound,
    DecodeError,
    StoreIoError,
    InvalidArgument,
}

// =============================================================================
// COMMIT
// =============================================================================

/// Outcome of validating an ordered transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// Applied to the world state.
    Valid,
    /// A key read during simulation has since changed.
    MvccReadConflict,
    /// A range scanned during simulation now returns different keys.
    PhantomReadConflict,
    /// The transaction id was already committed.
    #[serde(rename = "DUPLICATE_TXID")]
    DuplicateTxId,
    /// The envelope could not be interpreted.
    BadPayload,
}

impl ValidationCode {
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationCode::Valid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationCode::Valid => "VALID",
            ValidationCode::MvccReadConflict => "MVCC_READ_CONFLICT",
            ValidationCode::PhantomReadConflict => "PHANTOM_READ_CONFLICT",
            ValidationCode::DuplicateTxId => "DUPLICATE_TXID",
            ValidationCode::BadPayload => "BAD_PAYLOAD",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status of a transaction after its block was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub tx_id: TxId,
    pub block_num: u64,
    pub code: ValidationCode,
}

impl CommitStatus {
    pub fn is_success(&self) -> bool {
        self.code.is_valid()
    }
}
