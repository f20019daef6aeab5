//! # In-Process Channel
//!
//! [`LedgerChannel`] backed by components living in this process: the
//! endorsing peer (al-02) and the ordering service (al-03).
//!
//! ```text
//! Gateway ──evaluate/endorse──→ ContractService
//!         ──submit────────────→ OrderingHandle::broadcast
//!         ──commit_status─────→ OrderingHandle::commit_status
//! ```

use al_02_asset_contract::{ContractError, ContractService, EndorserApi};
use al_03_transaction_ordering::{OrderingError, OrderingHandle};
use al_04_submission_gateway::{ChannelError, LedgerChannel};
use async_trait::async_trait;
use shared_types::{CommitStatus, EndorsedTransaction, Proposal, TxId};
use std::sync::Arc;

pub struct InProcessChannel {
    peer: Arc<ContractService>,
    orderer: OrderingHandle,
}

impl InProcessChannel {
    pub fn new(peer: Arc<ContractService>, orderer: OrderingHandle) -> Self {
        Self { peer, orderer }
    }
}

#[async_trait]
impl LedgerChannel for InProcessChannel {
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, ChannelError> {
        self.peer.evaluate(proposal).await.map_err(contract_error)
    }

    async fn endorse(&self, proposal: Proposal) -> Result<EndorsedTransaction, ChannelError> {
        self.peer.endorse(proposal).await.map_err(contract_error)
    }

    async fn submit(&self, tx: EndorsedTransaction) -> Result<(), ChannelError> {
        self.orderer.broadcast(tx).map_err(ordering_error)
    }

    async fn commit_status(&self, tx_id: &TxId) -> Result<CommitStatus, ChannelError> {
        self.orderer
            .commit_status(tx_id)
            .await
            .map_err(ordering_error)
    }
}

fn contract_error(e: ContractError) -> ChannelError {
    ChannelError::Contract {
        code: e.code(),
        message: e.to_string(),
    }
}

fn ordering_error(e: OrderingError) -> ChannelError {
    match e {
        OrderingError::QueueFull { .. } => ChannelError::Ordering(e.to_string()),
        OrderingError::Closed | OrderingError::Store(_) | OrderingError::InvalidConfig(_) => {
            ChannelError::Unavailable(e.to_string())
        }
    }
}
