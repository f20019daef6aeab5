//! # Component Container
//!
//! Holds the ledger's components and wires them in dependency order.

pub mod components;
pub mod config;

pub use components::LedgerContainer;
pub use config::{ConfigError, RuntimeConfig};
