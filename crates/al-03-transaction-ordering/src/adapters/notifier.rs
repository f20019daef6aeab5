//! Commit notification - async bridge between the committer and waiters.
//!
//! Maps transaction ids to either the waiters still blocked on them or the
//! final status. A waiter may register before or after the commit; it gets
//! the same answer either way, as long as it asks within the retention
//! window. [`cleanup_task`] sweeps statuses older than that window and
//! waiters whose callers have given up.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{CommitStatus, TxId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, watch};
use tracing::debug;

enum Slot {
    Waiting(Vec<oneshot::Sender<CommitStatus>>),
    Done {
        status: CommitStatus,
        recorded_at: Instant,
    },
}

/// Records commit statuses and wakes waiters.
pub struct CommitNotifier {
    slots: DashMap<TxId, Slot>,
    closed: AtomicBool,
}

impl CommitNotifier {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Get a receiver for the status of `tx_id`.
    ///
    /// Resolves immediately when the transaction is already committed. After
    /// [`close`](Self::close) an unresolved receiver errors instead of
    /// waiting forever.
    pub fn subscribe(&self, tx_id: &TxId) -> oneshot::Receiver<CommitStatus> {
        let (tx, rx) = oneshot::channel();

        match self.slots.entry(tx_id.clone()) {
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Slot::Done { status, .. } => {
                    let _ = tx.send(status.clone());
                }
                Slot::Waiting(waiters) => {
                    if !self.closed.load(Ordering::Acquire) {
                        waiters.push(tx);
                    }
                }
            },
            Entry::Vacant(slot) => {
                if !self.closed.load(Ordering::Acquire) {
                    slot.insert(Slot::Waiting(vec![tx]));
                }
            }
        }

        rx
    }

    /// Record a final status and wake everyone waiting on it.
    ///
    /// The first status recorded for an id is kept; a later duplicate of the
    /// same id does not overwrite it.
    pub fn notify(&self, status: CommitStatus) {
        let waiters = match self.slots.entry(status.tx_id.clone()) {
            Entry::Occupied(mut slot) => {
                if matches!(slot.get(), Slot::Done { .. }) {
                    return;
                }
                match std::mem::replace(slot.get_mut(), Slot::done(status.clone())) {
                    Slot::Waiting(waiters) => waiters,
                    Slot::Done { .. } => Vec::new(),
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Slot::done(status.clone()));
                Vec::new()
            }
        };

        debug!(
            tx_id = status.tx_id.short(),
            code = %status.code,
            waiters = waiters.len(),
            "Commit status recorded"
        );

        for waiter in waiters {
            // Receiver may have timed out and gone away.
            let _ = waiter.send(status.clone());
        }
    }

    /// Final status, if committed.
    pub fn status(&self, tx_id: &TxId) -> Option<CommitStatus> {
        match self.slots.get(tx_id).as_deref() {
            Some(Slot::Done { status, .. }) => Some(status.clone()),
            _ => None,
        }
    }

    pub fn is_committed(&self, tx_id: &TxId) -> bool {
        self.status(tx_id).is_some()
    }

    /// Number of transactions still being waited on.
    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Waiting(_)))
            .count()
    }

    /// Number of transactions tracked, waiting or done.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Forget statuses recorded more than `retention` ago and waiters whose
    /// receivers are gone. Returns the number of slots removed.
    pub fn remove_expired(&self, retention: Duration) -> usize {
        let now = Instant::now();
        let before = self.slots.len();

        self.slots.retain(|_, slot| match slot {
            Slot::Done { recorded_at, .. } => now.duration_since(*recorded_at) < retention,
            Slot::Waiting(waiters) => {
                waiters.retain(|waiter| !waiter.is_closed());
                !waiters.is_empty()
            }
        });

        before.saturating_sub(self.slots.len())
    }

    /// Drop every outstanding waiter and refuse new ones.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.slots.retain(|_, slot| matches!(slot, Slot::Done { .. }));
    }
}

impl Slot {
    fn done(status: CommitStatus) -> Self {
        Slot::Done {
            status,
            recorded_at: Instant::now(),
        }
    }
}

/// Periodically sweep `notifier` until `shutdown` flips to true.
pub async fn cleanup_task(
    notifier: Arc<CommitNotifier>,
    retention: Duration,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                let removed = notifier.remove_expired(retention);
                if removed > 0 {
                    debug!(removed, remaining = notifier.len(), "Swept commit statuses");
                }
            }
        }
    }
}

impl Default for CommitNotifier {
    fn default() -> Self {
        Self::new()
    }
}
