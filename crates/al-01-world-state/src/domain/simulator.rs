//! Transaction simulation over a snapshot.
//!
//! A [`TxSimulator`] is the contract's view of the ledger during one
//! transaction. Writes are buffered, never applied; reads are served from the
//! buffer first and the snapshot second. Every snapshot read and every range
//! scan is recorded so the committer can detect whether the world moved on
//! before the transaction was ordered.

use super::errors::{validate_key, StateError};
use super::snapshot::{KeyModification, StateSnapshot};
use crate::ports::TransactionContext;
use shared_types::{KvRead, KvWrite, RangeQueryInfo, ReadWriteSet, Timestamp, TxId};
use std::collections::BTreeMap;

/// Buffered effect on one key. `None` is a delete.
type PendingWrite = Option<Vec<u8>>;

pub struct TxSimulator {
    tx_id: TxId,
    timestamp: Timestamp,
    snapshot: StateSnapshot,
    reads: Vec<KvRead>,
    range_queries: Vec<RangeQueryInfo>,
    writes: BTreeMap<String, PendingWrite>,
}

impl TxSimulator {
    pub fn new(snapshot: StateSnapshot, tx_id: TxId, timestamp: Timestamp) -> Self {
        Self {
            tx_id,
            timestamp,
            snapshot,
            reads: Vec::new(),
            range_queries: Vec::new(),
            writes: BTreeMap::new(),
        }
    }

    /// Height of the snapshot this simulation runs against.
    pub fn snapshot_height(&self) -> u64 {
        self.snapshot.height()
    }

    /// Consume the simulator and return what it read and wants to write.
    pub fn into_rw_set(self) -> ReadWriteSet {
        let writes = self
            .writes
            .into_iter()
            .map(|(key, pending)| match pending {
                Some(value) => KvWrite::put(key, value),
                None => KvWrite::delete(key),
            })
            .collect();

        ReadWriteSet {
            reads: self.reads,
            range_queries: self.range_queries,
            writes,
        }
    }

    fn record_read(&mut self, key: &str) {
        if self.reads.iter().any(|r| r.key == key) {
            return;
        }
        let version = self.snapshot.get(key).map(|v| v.version);
        self.reads.push(KvRead {
            key: key.to_string(),
            version,
        });
    }
}

impl TransactionContext for TxSimulator {
    fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        validate_key(key)?;

        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }

        self.record_read(key);
        Ok(self.snapshot.get(key).map(|v| v.value.clone()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StateError> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn get_state_by_range(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StateError> {
        let mut merged: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut observed = Vec::new();

        for (key, versioned) in self.snapshot.range(start, end) {
            observed.push(KvRead {
                key: key.clone(),
                version: Some(versioned.version),
            });
            merged.insert(key.clone(), versioned.value.clone());
        }

        let in_range = |key: &str| key >= start && (end.is_empty() || key < end);
        for (key, pending) in self.writes.iter().filter(|(k, _)| in_range(k)) {
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        self.range_queries.push(RangeQueryInfo {
            start_key: start.to_string(),
            end_key: end.to_string(),
            reads: observed,
        });

        Ok(merged.into_iter().collect())
    }

    fn get_history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StateError> {
        validate_key(key)?;
        Ok(self.snapshot.history(key).to_vec())
    }
}
