//! # AL-04 Submission Gateway
//!
//! Client-side call contract of the asset ledger. Callers name a contract
//! function; the gateway decides how it reaches the ledger, bounds every
//! phase with its own budget and reports failures with a stable kind.
//!
//! ## Routing
//!
//! | Kind | Functions | Path | Budget |
//! |------|-----------|------|--------|
//! | evaluate | `ReadAsset`, `AssetExists`, `GetAllAssets`, `GetAssetHistory` | one peer | evaluate (5s) |
//! | submit | `InitLedger`, `CreateAsset`, `UpdateAsset`, `DeleteAsset` | endorse, order, commit | endorse (15s), submit (5s), commit status (60s) |
//!
//! ## Architecture
//!
//! - **Domain**: method registry, [`GatewayConfig`], request bodies, [`GatewayError`]
//! - **Ports**: [`LedgerChannel`], implemented by whatever connects to the network
//! - **Service**: [`Gateway`]
//!
//! ## Usage Example
//!
//! ```ignore
//! let gateway = Gateway::new(channel, GatewayConfig::default())?;
//! gateway.init_ledger().await?;
//! let asset = gateway.read_asset("D001").await?;
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::{Gateway, GatewayStats};
