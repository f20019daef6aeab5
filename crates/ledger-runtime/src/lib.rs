//! # Ledger Runtime
//!
//! Runs one asset ledger node in a single process. The `main.rs` binary is
//! a thin shell around [`LedgerRuntime`]; the library exists so the
//! integration tests can drive the same wiring.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and component wiring
//! - `adapters/` - port implementations connecting the components
//!
//! ## Submit Flow
//!
//! ```text
//! Gateway ──endorse──→ ContractService ──simulate──→ snapshot
//!    │
//!    └──broadcast──→ OrderingService ──Block──→ Committer ──apply──→ WorldState
//!                                                   │
//!    ←─────────────── commit status ────────────────┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `AL_CONFIG` file, environment)
//! 2. Initialize components in dependency order
//! 3. Seed the ledger through `InitLedger` when `init_ledger` is set
//! 4. Serve until shutdown

pub mod adapters;
pub mod container;

use std::sync::Arc;

use tracing::{info, warn};

use al_01_world_state::WorldStateStore;
use al_04_submission_gateway::{ErrorKind, Gateway, GatewayError};
use shared_types::ContractErrorCode;

pub use adapters::InProcessChannel;
pub use container::{ConfigError, LedgerContainer, RuntimeConfig};

/// The ledger runtime orchestrating all components.
pub struct LedgerRuntime {
    container: LedgerContainer,
}

impl LedgerRuntime {
    /// Create a runtime over a fresh in-memory world state.
    pub fn new(config: RuntimeConfig) -> Result<Self, ConfigError> {
        info!("Creating asset ledger runtime");
        Ok(Self {
            container: LedgerContainer::new(config)?,
        })
    }

    /// Create a runtime over an existing world state.
    pub fn with_store(
        config: RuntimeConfig,
        store: Arc<dyn WorldStateStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            container: LedgerContainer::with_store(config, store)?,
        })
    }

    /// Start the runtime. Seeds the ledger when configured to; an already
    /// seeded ledger is not an error.
    pub async fn start(&self) -> Result<(), GatewayError> {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Asset Ledger Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!(
            channel = %config.gateway.channel,
            contract = %config.gateway.contract,
            identity = %config.gateway.identity,
            "Serving"
        );

        if config.init_ledger {
            match self.container.gateway.init_ledger().await {
                Ok(()) => info!("Ledger initialized with seed assets"),
                Err(e)
                    if e.kind() == ErrorKind::EndorsementRejected
                        && e.contract_code() == Some(ContractErrorCode::AlreadyExists) =>
                {
                    warn!("Ledger already initialized, skipping seed: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Client entry point.
    pub fn gateway(&self) -> Arc<Gateway<InProcessChannel>> {
        Arc::clone(&self.container.gateway)
    }

    pub fn store(&self) -> Arc<dyn WorldStateStore> {
        Arc::clone(&self.container.store)
    }

    pub fn container(&self) -> &LedgerContainer {
        &self.container
    }

    /// Shutdown the node gracefully.
    ///
    /// 1. Refuse new gateway calls
    /// 2. Stop the ordering task and release commit waiters
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        self.container.gateway.close();
        self.container.orderer.shutdown().await;

        let stats = self.container.orderer.stats();
        info!(
            blocks = stats.blocks_cut,
            valid = stats.valid_transactions,
            invalid = stats.invalid_transactions,
            "Shutdown complete"
        );
    }
}
