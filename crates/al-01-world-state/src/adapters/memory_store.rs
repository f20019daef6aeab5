use crate::domain::{
    validate_key, KeyModification, LedgerImage, StateError, StateSnapshot, VersionedValue,
};
use crate::ports::WorldStateStore;
use shared_types::{KvWrite, Timestamp, TxId, Version};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory implementation of WorldStateStore.
///
/// The lock guards only the `Arc` swap: snapshot readers hold it for a
/// pointer clone, the committer for the duration of one write set.
pub struct InMemoryWorldState {
    image: RwLock<Arc<LedgerImage>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self {
            image: RwLock::new(Arc::new(LedgerImage::default())),
        }
    }

    fn current(&self) -> Result<Arc<LedgerImage>, StateError> {
        let image = self.image.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(Arc::clone(&image))
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldStateStore for InMemoryWorldState {
    fn snapshot(&self) -> Result<StateSnapshot, StateError> {
        Ok(StateSnapshot::new(self.current()?))
    }

    fn get_versioned(&self, key: &str) -> Result<Option<VersionedValue>, StateError> {
        validate_key(key)?;
        Ok(self.current()?.get(key).cloned())
    }

    fn range_scan(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, VersionedValue)>, StateError> {
        let image = self.current()?;
        let entries = image
            .range(start, end)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(entries)
    }

    fn history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StateError> {
        validate_key(key)?;
        Ok(self.current()?.history(key).to_vec())
    }

    fn apply_transaction(
        &self,
        tx_id: &TxId,
        timestamp: Timestamp,
        version: Version,
        writes: &[KvWrite],
    ) -> Result<(), StateError> {
        let mut image = self.image.write().map_err(|_| StateError::LockPoisoned)?;
        Arc::make_mut(&mut *image).apply(tx_id, timestamp, version, writes)?;

        debug!(
            tx_id = tx_id.short(),
            version = %version,
            writes = writes.len(),
            "Applied transaction to world state"
        );
        Ok(())
    }

    fn height(&self) -> Result<u64, StateError> {
        Ok(self.current()?.height())
    }
}
