//! MVCC validation of an ordered transaction against committed state.
//!
//! Checks run in this order and the first failure wins:
//!
//! 1. the envelope is well formed (`BadPayload`)
//! 2. the transaction id has not been committed before (`DuplicateTxId`)
//! 3. every key read still has the version seen at simulation (`MvccReadConflict`)
//! 4. every range scanned still returns the same keys and versions
//!    (`PhantomReadConflict`)
//!
//! Earlier valid transactions of the same block are already applied when a
//! later one is checked, so intra-block conflicts are caught the same way.

use al_01_world_state::{StateError, WorldStateStore};
use shared_types::{EndorsedTransaction, KvRead, RangeQueryInfo, ValidationCode};

pub fn validate_transaction(
    store: &dyn WorldStateStore,
    tx: &EndorsedTransaction,
    channel: &str,
    already_committed: impl Fn(&EndorsedTransaction) -> bool,
) -> Result<ValidationCode, StateError> {
    if !is_well_formed(tx, channel) {
        return Ok(ValidationCode::BadPayload);
    }

    if already_committed(tx) {
        return Ok(ValidationCode::DuplicateTxId);
    }

    for read in &tx.rw_set.reads {
        if !read_still_current(store, read)? {
            return Ok(ValidationCode::MvccReadConflict);
        }
    }

    for query in &tx.rw_set.range_queries {
        if !range_unchanged(store, query)? {
            return Ok(ValidationCode::PhantomReadConflict);
        }
    }

    Ok(ValidationCode::Valid)
}

fn is_well_formed(tx: &EndorsedTransaction, channel: &str) -> bool {
    !tx.proposal.tx_id.as_str().is_empty()
        && tx.proposal.channel == channel
        && tx.rw_set.writes.iter().all(|w| !w.key.is_empty())
        && tx.rw_set.reads.iter().all(|r| !r.key.is_empty())
}

fn read_still_current(store: &dyn WorldStateStore, read: &KvRead) -> Result<bool, StateError> {
    let current = store.get_versioned(&read.key)?.map(|v| v.version);
    Ok(current == read.version)
}

fn range_unchanged(store: &dyn WorldStateStore, query: &RangeQueryInfo) -> Result<bool, StateError> {
    let now = store.range_scan(&query.start_key, &query.end_key)?;
    if now.len() != query.reads.len() {
        return Ok(false);
    }
    Ok(now
        .iter()
        .zip(&query.reads)
        .all(|((key, value), seen)| *key == seen.key && Some(value.version) == seen.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use al_01_world_state::InMemoryWorldState;
    use chrono::Utc;
    use shared_types::{KvWrite, Proposal, ReadWriteSet, TxId, Version};

    fn tx(rw_set: ReadWriteSet) -> EndorsedTransaction {
        EndorsedTransaction {
            proposal: Proposal::new("mychannel", "asset", "F", vec![], "Org1MSP"),
            rw_set,
            response_payload: vec![],
        }
    }

    fn seeded() -> InMemoryWorldState {
        let store = InMemoryWorldState::new();
        store
            .apply_transaction(
                &TxId::from_hex("01"),
                Utc::now(),
                Version::new(1, 0),
                &[KvWrite::put("A", b"a".to_vec()), KvWrite::put("C", b"c".to_vec())],
            )
            .unwrap();
        store
    }

    fn check(store: &InMemoryWorldState, t: &EndorsedTransaction) -> ValidationCode {
        validate_transaction(store, t, "mychannel", |_| false).unwrap()
    }

    #[test]
    fn test_matching_versions_are_valid() {
        let store = seeded();
        let t = tx(ReadWriteSet {
            reads: vec![
                KvRead { key: "A".into(), version: Some(Version::new(1, 0)) },
                KvRead { key: "B".into(), version: None },
            ],
            ..Default::default()
        });
        assert_eq!(check(&store, &t), ValidationCode::Valid);
    }

    #[test]
    fn test_stale_read_conflicts() {
        let store = seeded();
        let t = tx(ReadWriteSet {
            reads: vec![KvRead { key: "B".into(), version: None }],
            ..Default::default()
        });
        store
            .apply_transaction(
                &TxId::from_hex("02"),
                Utc::now(),
                Version::new(2, 0),
                &[KvWrite::put("B", b"b".to_vec())],
            )
            .unwrap();
        assert_eq!(check(&store, &t), ValidationCode::MvccReadConflict);
    }

    #[test]
    fn test_phantom_insert_in_range() {
        let store = seeded();
        let t = tx(ReadWriteSet {
            range_queries: vec![RangeQueryInfo {
                start_key: "".into(),
                end_key: "".into(),
                reads: vec![
                    KvRead { key: "A".into(), version: Some(Version::new(1, 0)) },
                    KvRead { key: "C".into(), version: Some(Version::new(1, 0)) },
                ],
            }],
            ..Default::default()
        });
        assert_eq!(check(&store, &t), ValidationCode::Valid);

        store
            .apply_transaction(
                &TxId::from_hex("03"),
                Utc::now(),
                Version::new(2, 0),
                &[KvWrite::put("B", b"b".to_vec())],
            )
            .unwrap();
        assert_eq!(check(&store, &t), ValidationCode::PhantomReadConflict);
    }

    #[test]
    fn test_duplicate_and_bad_payload() {
        let store = seeded();
        let t = tx(ReadWriteSet::default());
        let dup = validate_transaction(&store, &t, "mychannel", |_| true).unwrap();
        assert_eq!(dup, ValidationCode::DuplicateTxId);

        let wrong_channel = validate_transaction(&store, &t, "otherchannel", |_| false).unwrap();
        assert_eq!(wrong_channel, ValidationCode::BadPayload);

        let empty_key = tx(ReadWriteSet {
            writes: vec![KvWrite::put("", vec![])],
            ..Default::default()
        });
        assert_eq!(check(&store, &empty_key), ValidationCode::BadPayload);
    }
}
