//! # AL-03: Transaction Ordering and Commit
//!
//! Turns endorsed transactions into blocks and blocks into committed state.
//!
//! ## Architecture
//!
//! - **Domain**: `Block`, `BlockCommitResult`, MVCC validation rules
//! - **Adapters**: `CommitNotifier` (per-transaction status slots)
//! - **Application**: `Committer` and the `OrderingService` task
//!
//! ## Flow
//!
//! ```text
//! broadcast ──mpsc──→ [block cutter] ──Block──→ [Committer] ──apply──→ WorldStateStore
//!                                                    │
//!                                                    └──CommitStatus──→ CommitNotifier ──→ commit_status()
//! ```
//!
//! ## Guarantees
//!
//! - Blocks are numbered consecutively from the store height + 1.
//! - Transactions of a block are validated in order against committed state
//!   that already includes the block's earlier valid transactions.
//! - Every broadcast transaction that reaches a block gets exactly one
//!   status; conflicting transactions are invalidated, never dropped.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

pub use adapters::CommitNotifier;
pub use application::{Committer, OrderingHandle, OrderingService, OrderingStats};
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::OrderingError;
pub use domain::validation::validate_transaction;
