//! # Shared Types Crate
//!
//! Domain entities and ledger plumbing types shared by every Asset Ledger
//! crate.
//!
//! ## Contents
//!
//! - **Records**: [`Asset`], [`HistoryEntry`], [`Amount`]
//! - **Plumbing**: [`TxId`], [`Version`], [`Proposal`], [`ReadWriteSet`],
//!   [`EndorsedTransaction`], [`ValidationCode`], [`CommitStatus`]
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the JSON shape of an asset (upper-case keys)
//!   and of a history entry is fixed here and nowhere else.
//! - **Typed history**: history records are [`HistoryEntry`] values, never
//!   loosely typed maps.
//! - **No clocks**: nothing in this crate reads the time except
//!   [`Proposal::new`], which stamps the proposal once at creation.

pub mod amount;
pub mod entities;
pub mod errors;
pub mod ledger;

pub use amount::Amount;
pub use entities::*;
pub use errors::*;
pub use ledger::*;

/// Timestamp type used for every ledger time value.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
