use crate::domain::{KeyModification, StateError};
use shared_types::{Timestamp, TxId};

/// The ledger as seen by contract code during one transaction.
///
/// Implementations must be deterministic: the same snapshot, arguments and
/// transaction timestamp produce the same reads and writes.
pub trait TransactionContext {
    fn tx_id(&self) -> &TxId;

    /// Proposal timestamp. Contract code never reads a local clock.
    fn tx_timestamp(&self) -> Timestamp;

    /// Current value, including this transaction's own earlier writes.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    fn del_state(&mut self, key: &str) -> Result<(), StateError>;

    /// Key/value pairs in `[start, end)`, ascending. `("", "")` is everything.
    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StateError>;

    /// Committed modifications of `key`, oldest first.
    fn get_history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StateError>;
}
