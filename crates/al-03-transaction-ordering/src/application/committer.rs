//! Block committer
//!
//! Validates each transaction of a block in order, applies the valid ones
//! and publishes every status to the [`CommitNotifier`].
//!
//! The committer keeps the index of every transaction id it has ordered,
//! valid or not, so a replayed id is rejected for the life of the ledger
//! regardless of how long the notifier retains statuses.

use crate::adapters::CommitNotifier;
use crate::domain::{validate_transaction, Block, BlockCommitResult, OrderingError};
use al_01_world_state::WorldStateStore;
use parking_lot::Mutex;
use shared_types::{CommitStatus, TxId, Version};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct Committer {
    store: Arc<dyn WorldStateStore>,
    notifier: Arc<CommitNotifier>,
    channel: String,
    ordered: Mutex<HashSet<TxId>>,
}

impl Committer {
    pub fn new(
        store: Arc<dyn WorldStateStore>,
        notifier: Arc<CommitNotifier>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            channel: channel.into(),
            ordered: Mutex::new(HashSet::new()),
        }
    }

    /// Whether `tx_id` already appeared in a committed block.
    pub fn has_ordered(&self, tx_id: &TxId) -> bool {
        self.ordered.lock().contains(tx_id)
    }

    /// Commit one block.
    ///
    /// Invalid transactions leave state untouched but still get a status. A
    /// store failure aborts the rest of the block; statuses already
    /// published stay published.
    #[instrument(skip(self, block), fields(block_num = block.number, tx_count = block.len()))]
    pub fn commit_block(&self, block: &Block) -> Result<BlockCommitResult, OrderingError> {
        let mut statuses = Vec::with_capacity(block.len());

        for (tx_num, tx) in block.transactions.iter().enumerate() {
            let code = validate_transaction(self.store.as_ref(), tx, &self.channel, |t| {
                self.has_ordered(t.tx_id())
            })?;

            if code.is_valid() {
                self.store.apply_transaction(
                    tx.tx_id(),
                    tx.proposal.timestamp,
                    Version::new(block.number, tx_num as u64),
                    &tx.rw_set.writes,
                )?;
            } else {
                warn!(
                    tx_id = tx.tx_id().short(),
                    function = %tx.proposal.function,
                    code = %code,
                    "Transaction invalidated"
                );
            }

            self.ordered.lock().insert(tx.tx_id().clone());

            let status = CommitStatus {
                tx_id: tx.tx_id().clone(),
                block_num: block.number,
                code,
            };
            self.notifier.notify(status.clone());
            statuses.push(status);
        }

        let result = BlockCommitResult {
            number: block.number,
            statuses,
        };
        info!(
            valid = result.valid_count(),
            invalid = result.invalid_count(),
            "Committed block"
        );
        Ok(result)
    }
}
