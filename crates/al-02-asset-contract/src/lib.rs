//! # AL-02 Asset Contract - Deterministic Asset Registry
//!
//! ## Purpose
//!
//! Implements the asset registry's state transitions and the endorsing peer
//! that runs them. The contract only ever sees a [`TransactionContext`];
//! whether that context later commits is decided by ordering, not here.
//!
//! ## Functions
//!
//! | Function | Args | Kind | Result |
//! |----------|------|------|--------|
//! | `InitLedger` | - | submit | none |
//! | `CreateAsset` | dealerID, msisdn, mpin, balance, status, transType, remarks | submit | none |
//! | `ReadAsset` | dealerID | evaluate | Asset |
//! | `UpdateAsset` | dealerID, balance, status, transAmount, transType, remarks | submit | none |
//! | `DeleteAsset` | dealerID | submit | none |
//! | `AssetExists` | dealerID | evaluate | bool |
//! | `GetAllAssets` | - | evaluate | `[Asset]` |
//! | `GetAssetHistory` | dealerID | evaluate | `[HistoryEntry]` |
//!
//! ## Domain Invariants
//!
//! - An asset exists iff a live (non-deleted) value is stored under its key.
//! - `created_at` is written once; `updated_at` moves on every mutation and
//!   never backwards.
//! - No function reads a local clock.
//!
//! ## Usage Example
//!
//! ```ignore
//! use al_02_asset_contract::prelude::*;
//!
//! let service = ContractService::new(store, ServiceConfig::default());
//! let endorsed = service.endorse(proposal).await?;
//! ```
//!
//! [`TransactionContext`]: al_01_world_state::TransactionContext

pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use domain::*;
pub use errors::ContractError;
pub use ports::*;
pub use service::{ContractService, ServiceConfig, ServiceStats};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::{AssetContract, AssetUpdate, ContractFunction, NewAsset};
    pub use crate::errors::ContractError;
    pub use crate::ports::EndorserApi;
    pub use crate::service::{ContractService, ServiceConfig, ServiceStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
