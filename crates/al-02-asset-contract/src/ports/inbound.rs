//! # Driving Ports (API - Inbound)
//!
//! What an endorsing peer offers to clients: run a proposal without side
//! effects, or run it and hand back the read/write set for ordering.

use crate::errors::ContractError;
use async_trait::async_trait;
use shared_types::{EndorsedTransaction, Proposal};

/// Endorsing peer API.
#[async_trait]
pub trait EndorserApi: Send + Sync {
    /// Simulate the proposal and return the contract payload. The write set
    /// is discarded.
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, ContractError>;

    /// Simulate the proposal and return it with its read/write set.
    async fn endorse(&self, proposal: Proposal) -> Result<EndorsedTransaction, ContractError>;
}
