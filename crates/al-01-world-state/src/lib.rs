//! # al-01-world-state
//!
//! World State Store and History Log for the Asset Ledger.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: exclusively owns current key values and the
//!   append-only history of every key.
//! - **Snapshots**: every simulation runs against an immutable
//!   [`StateSnapshot`]; readers never block the commit path.
//! - **Simulation**: [`TxSimulator`] implements [`TransactionContext`] over a
//!   snapshot and produces the read/write set handed to ordering.
//! - **Commit**: [`WorldStateStore::apply_transaction`] applies a write set
//!   and appends history in one critical section.
//!
//! ## Key Semantics
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | `get_state` | sees this transaction's own earlier writes, else the snapshot |
//! | `get_state_by_range(start, end)` | `[start, end)`, empty `end` is unbounded, key order |
//! | `del_state` | key absent from reads and scans until written again |
//! | `get_history_for_key` | committed modifications, oldest first, tombstones included |

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
