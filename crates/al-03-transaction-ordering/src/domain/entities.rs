//! Core entities for ordering

use serde::{Deserialize, Serialize};
use shared_types::{CommitStatus, EndorsedTransaction};

/// An ordered batch of endorsed transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Height of this block. The first block is 1.
    pub number: u64,
    pub transactions: Vec<EndorsedTransaction>,
}

impl Block {
    pub fn new(number: u64, transactions: Vec<EndorsedTransaction>) -> Self {
        Self {
            number,
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Outcome of committing a block, one status per transaction in block order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCommitResult {
    pub number: u64,
    pub statuses: Vec<CommitStatus>,
}

impl BlockCommitResult {
    pub fn valid_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_success()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.statuses.len() - self.valid_count()
    }
}
