use crate::domain::{KeyModification, StateError, StateSnapshot, VersionedValue};
use shared_types::{KvWrite, Timestamp, TxId, Version};

/// World state storage abstraction.
///
/// The commit path is the only caller of [`apply_transaction`]; everything
/// else reads, either directly or through a [`StateSnapshot`].
///
/// [`apply_transaction`]: WorldStateStore::apply_transaction
pub trait WorldStateStore: Send + Sync {
    /// Consistent view of state and history at the current height.
    fn snapshot(&self) -> Result<StateSnapshot, StateError>;

    fn get_versioned(&self, key: &str) -> Result<Option<VersionedValue>, StateError>;

    /// Committed entries in `[start, end)`, ascending. Empty `end` is unbounded.
    fn range_scan(&self, start: &str, end: &str)
        -> Result<Vec<(String, VersionedValue)>, StateError>;

    fn history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StateError>;

    /// Apply one validated transaction: every write lands at `version` and
    /// appends a history entry, all or nothing.
    fn apply_transaction(
        &self,
        tx_id: &TxId,
        timestamp: Timestamp,
        version: Version,
        writes: &[KvWrite],
    ) -> Result<(), StateError>;

    /// Highest block number that changed state.
    fn height(&self) -> Result<u64, StateError>;
}
