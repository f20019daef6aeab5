//! Ordering Service
//!
//! Runs the orderer and committer as one tokio task:
//!
//! 1. Wait for the first transaction of the next block
//! 2. Keep collecting until `max_message_count` or `batch_timeout` elapses
//! 3. Cut the block with the next height
//! 4. Validate, apply and publish statuses through the [`Committer`]
//!
//! A second task sweeps commit statuses past their retention window.
//!
//! Everything outside the task talks to it through an [`OrderingHandle`].

use crate::adapters::{cleanup_task, CommitNotifier};
use crate::application::committer::Committer;
use crate::config::OrderingConfig;
use crate::domain::{Block, OrderingError};
use al_01_world_state::WorldStateStore;
use parking_lot::Mutex;
use shared_types::{CommitStatus, EndorsedTransaction, TxId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Counters kept by the ordering task.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderingStats {
    pub blocks_cut: u64,
    pub valid_transactions: u64,
    pub invalid_transactions: u64,
}

pub struct OrderingService;

impl OrderingService {
    /// Start the ordering task. The first block cut is `store.height() + 1`.
    pub fn spawn(
        config: OrderingConfig,
        store: Arc<dyn WorldStateStore>,
    ) -> Result<OrderingHandle, OrderingError> {
        config.validate()?;

        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let notifier = Arc::new(CommitNotifier::new());
        let stats = Arc::new(Mutex::new(OrderingStats::default()));
        let next_block = store.height()? + 1;

        let committer = Committer::new(Arc::clone(&store), Arc::clone(&notifier), &config.channel);
        let worker = OrderingLoop {
            config: config.clone(),
            queue: queue_rx,
            shutdown: shutdown_rx,
            committer,
            notifier: Arc::clone(&notifier),
            stats: Arc::clone(&stats),
            next_block,
        };

        info!(
            channel = %config.channel,
            max_message_count = config.max_message_count,
            batch_timeout_ms = config.batch_timeout_ms,
            next_block,
            "Starting ordering service"
        );
        let task = tokio::spawn(worker.run());
        let sweeper = tokio::spawn(cleanup_task(
            Arc::clone(&notifier),
            config.status_retention(),
            config.cleanup_interval(),
            shutdown_tx.subscribe(),
        ));

        Ok(OrderingHandle {
            queue: queue_tx,
            capacity: config.queue_capacity,
            notifier,
            stats,
            shutdown: Arc::new(shutdown_tx),
            task: Arc::new(Mutex::new(Some(task))),
            sweeper: Arc::new(Mutex::new(Some(sweeper))),
        })
    }
}

/// Client side of the ordering service. Cheap to clone.
#[derive(Clone)]
pub struct OrderingHandle {
    queue: mpsc::Sender<EndorsedTransaction>,
    capacity: usize,
    notifier: Arc<CommitNotifier>,
    stats: Arc<Mutex<OrderingStats>>,
    shutdown: Arc<watch::Sender<bool>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
    sweeper: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl OrderingHandle {
    /// Enqueue an endorsed transaction for ordering. Does not wait for commit.
    pub fn broadcast(&self, tx: EndorsedTransaction) -> Result<(), OrderingError> {
        let tx_id = tx.tx_id().clone();
        self.queue.try_send(tx).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => OrderingError::QueueFull {
                capacity: self.capacity,
            },
            mpsc::error::TrySendError::Closed(_) => OrderingError::Closed,
        })?;
        debug!(tx_id = tx_id.short(), "Transaction queued for ordering");
        Ok(())
    }

    /// Wait for the final status of `tx_id`. Callers bound this with their
    /// own timeout.
    pub async fn commit_status(&self, tx_id: &TxId) -> Result<CommitStatus, OrderingError> {
        self.notifier
            .subscribe(tx_id)
            .await
            .map_err(|_| OrderingError::Closed)
    }

    pub fn stats(&self) -> OrderingStats {
        self.stats.lock().clone()
    }

    /// Number of submitters currently blocked on a commit status.
    pub fn pending_commits(&self) -> usize {
        self.notifier.pending_count()
    }

    /// Stop the ordering task and release every waiter. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.shutdown.send(true);
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!("Ordering task ended abnormally: {}", e);
            }
        }
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            if let Err(e) = sweeper.await {
                error!("Status sweeper ended abnormally: {}", e);
            }
        }
        self.notifier.close();
    }
}

struct OrderingLoop {
    config: OrderingConfig,
    queue: mpsc::Receiver<EndorsedTransaction>,
    shutdown: watch::Receiver<bool>,
    committer: Committer,
    notifier: Arc<CommitNotifier>,
    stats: Arc<Mutex<OrderingStats>>,
    next_block: u64,
}

impl OrderingLoop {
    async fn run(mut self) {
        while let Some(batch) = self.next_batch().await {
            let block = Block::new(self.next_block, batch);
            self.next_block += 1;

            match self.committer.commit_block(&block) {
                Ok(result) => {
                    let mut stats = self.stats.lock();
                    stats.blocks_cut += 1;
                    stats.valid_transactions += result.valid_count() as u64;
                    stats.invalid_transactions += result.invalid_count() as u64;
                }
                Err(e) => {
                    error!(block_num = block.number, error = %e, "Commit failed, halting ordering");
                    break;
                }
            }
        }

        self.queue.close();
        self.notifier.close();
        info!("Ordering service stopped");
    }

    /// Collect the next block's transactions. `None` means stop.
    async fn next_batch(&mut self) -> Option<Vec<EndorsedTransaction>> {
        let first = tokio::select! {
            biased;
            _ = self.shutdown.changed() => return None,
            msg = self.queue.recv() => msg?,
        };

        let mut batch = vec![first];
        let deadline = Instant::now() + self.config.batch_timeout();

        while batch.len() < self.config.max_message_count {
            tokio::select! {
                biased;
                _ = self.shutdown.changed() => return None,
                _ = tokio::time::sleep_until(deadline) => break,
                msg = self.queue.recv() => match msg {
                    Some(tx) => batch.push(tx),
                    None => break,
                },
            }
        }

        Some(batch)
    }
}
