//! Outbound port to the ledger network.
//!
//! The gateway only knows how to build proposals and bound waits. Reaching
//! a peer, signing and talking to the orderer all live behind
//! [`LedgerChannel`].

use async_trait::async_trait;
use shared_types::{CommitStatus, ContractErrorCode, EndorsedTransaction, Proposal, TxId};
use thiserror::Error;

/// Errors raised by a [`LedgerChannel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The contract ran and refused the proposal.
    #[error("{message}")]
    Contract {
        code: ContractErrorCode,
        message: String,
    },

    /// No peer or orderer can be reached.
    #[error("channel unavailable: {0}")]
    Unavailable(String),

    /// The orderer refused the transaction.
    #[error("ordering failed: {0}")]
    Ordering(String),
}

/// A signed connection to one channel of the ledger.
#[async_trait]
pub trait LedgerChannel: Send + Sync {
    /// Run a proposal on one peer without ordering it.
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, ChannelError>;

    /// Collect an endorsement for a proposal.
    async fn endorse(&self, proposal: Proposal) -> Result<EndorsedTransaction, ChannelError>;

    /// Hand an endorsed transaction to the orderer. Returns once accepted.
    async fn submit(&self, tx: EndorsedTransaction) -> Result<(), ChannelError>;

    /// Wait for the commit status of a submitted transaction.
    async fn commit_status(&self, tx_id: &TxId) -> Result<CommitStatus, ChannelError>;
}
