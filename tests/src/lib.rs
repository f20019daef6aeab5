//! # Asset Ledger Test Suite
//!
//! Unified test crate driving the whole ledger through its public entry
//! points.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs        # create/read/update/delete/history end to end
//! │   ├── properties.rs   # registry properties over generated inputs
//! │   ├── concurrency.rs  # conflicting and parallel submits
//! │   └── timeouts.rs     # per-phase budgets against a stalling network
//! └── benches/
//!     └── ledger_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p al-tests
//! cargo test -p al-tests integration::timeouts::
//! cargo bench -p al-tests
//! ```

pub mod integration;
