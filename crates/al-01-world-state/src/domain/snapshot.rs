//! Copy-on-write ledger images.
//!
//! The store holds an `Arc<LedgerImage>`. Readers clone the `Arc` and keep a
//! consistent view for as long as they like; the commit path mutates through
//! `Arc::make_mut`, which copies only while an older snapshot is still alive.

use super::errors::{validate_key, StateError};
use shared_types::{KvWrite, Timestamp, TxId, Version};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

/// A current value and the version that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: Version,
}

/// One committed modification of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    pub tx_id: TxId,
    pub timestamp: Timestamp,
    pub is_delete: bool,
    /// Empty for deletions.
    pub value: Vec<u8>,
    pub version: Version,
}

/// Current state plus history at one height.
#[derive(Debug, Clone, Default)]
pub struct LedgerImage {
    height: u64,
    state: BTreeMap<String, VersionedValue>,
    history: HashMap<String, Vec<KeyModification>>,
}

impl LedgerImage {
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn get(&self, key: &str) -> Option<&VersionedValue> {
        self.state.get(key)
    }

    /// Keys in `[start, end)` in ascending order. An empty `end` is unbounded.
    pub fn range<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> Box<dyn Iterator<Item = (&'a String, &'a VersionedValue)> + 'a> {
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else if start >= end {
            return Box::new(std::iter::empty());
        } else {
            Bound::Excluded(end)
        };
        Box::new(self.state.range::<str, _>((Bound::Included(start), upper)))
    }

    pub fn history(&self, key: &str) -> &[KeyModification] {
        self.history.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Apply one transaction's writes and append their history.
    ///
    /// Keys are checked before anything is touched, so a rejected write set
    /// leaves the image unchanged.
    pub fn apply(
        &mut self,
        tx_id: &TxId,
        timestamp: Timestamp,
        version: Version,
        writes: &[KvWrite],
    ) -> Result<(), StateError> {
        for write in writes {
            validate_key(&write.key)?;
        }

        for write in writes {
            if write.is_delete {
                self.state.remove(&write.key);
            } else {
                self.state.insert(
                    write.key.clone(),
                    VersionedValue {
                        value: write.value.clone(),
                        version,
                    },
                );
            }

            self.history
                .entry(write.key.clone())
                .or_default()
                .push(KeyModification {
                    tx_id: tx_id.clone(),
                    timestamp,
                    is_delete: write.is_delete,
                    value: if write.is_delete {
                        Vec::new()
                    } else {
                        write.value.clone()
                    },
                    version,
                });
        }

        self.height = self.height.max(version.block_num);
        Ok(())
    }
}

/// An immutable, cheaply cloned view of the ledger at one height.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    image: Arc<LedgerImage>,
}

impl StateSnapshot {
    pub fn new(image: Arc<LedgerImage>) -> Self {
        Self { image }
    }

    pub fn height(&self) -> u64 {
        self.image.height()
    }

    pub fn get(&self, key: &str) -> Option<&VersionedValue> {
        self.image.get(key)
    }

    pub fn range<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a VersionedValue)> + 'a {
        self.image.range(start, end)
    }

    pub fn history(&self, key: &str) -> &[KeyModification] {
        self.image.history(key)
    }

    pub fn len(&self) -> usize {
        self.image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}
