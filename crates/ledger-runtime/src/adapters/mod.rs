//! Port implementations connecting the ledger components.

pub mod channel;

pub use channel::InProcessChannel;
