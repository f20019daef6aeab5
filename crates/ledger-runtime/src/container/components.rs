//! # Ledger Container
//!
//! Initialization order:
//!
//! ```text
//! Level 0: World State (no dependencies)
//! Level 1: Contract Service, Ordering Service (share the world state)
//! Level 2: Gateway (talks to both through an InProcessChannel)
//! ```
//!
//! All components are `Arc`-shared; none of them holds a reference back up
//! the levels.

use std::sync::Arc;

use tracing::{info, instrument};

use al_01_world_state::{InMemoryWorldState, WorldStateStore};
use al_02_asset_contract::{ContractService, ServiceConfig};
use al_03_transaction_ordering::{OrderingHandle, OrderingService};
use al_04_submission_gateway::Gateway;

use crate::adapters::InProcessChannel;
use crate::container::config::{ConfigError, RuntimeConfig};

/// Every component of one ledger node.
pub struct LedgerContainer {
    /// World state and history log.
    pub store: Arc<dyn WorldStateStore>,
    /// Endorsing peer running the asset contract.
    pub peer: Arc<ContractService>,
    /// Block cutter and committer.
    pub orderer: OrderingHandle,
    /// Client entry point.
    pub gateway: Arc<Gateway<InProcessChannel>>,
    pub config: RuntimeConfig,
}

impl LedgerContainer {
    /// Build every component over a fresh in-memory world state. Must run
    /// inside a tokio runtime: the ordering task is spawned here.
    pub fn new(config: RuntimeConfig) -> Result<Self, ConfigError> {
        let store: Arc<dyn WorldStateStore> = Arc::new(InMemoryWorldState::new());
        Self::with_store(config, store)
    }

    /// Build every component over an existing world state.
    #[instrument(skip_all, fields(channel = %config.gateway.channel))]
    pub fn with_store(
        mut config: RuntimeConfig,
        store: Arc<dyn WorldStateStore>,
    ) -> Result<Self, ConfigError> {
        config.ordering.channel = config.gateway.channel.clone();
        config.validate()?;

        // Level 1
        let peer = Arc::new(ContractService::new(
            Arc::clone(&store),
            ServiceConfig {
                channel: config.gateway.channel.clone(),
                contract_name: config.gateway.contract.clone(),
            },
        ));
        let orderer = OrderingService::spawn(config.ordering.clone(), Arc::clone(&store))?;

        // Level 2
        let channel = InProcessChannel::new(Arc::clone(&peer), orderer.clone());
        let gateway = Arc::new(Gateway::new(channel, config.gateway.clone())?);

        info!(contract = %config.gateway.contract, "Ledger components initialized");

        Ok(Self {
            store,
            peer,
            orderer,
            gateway,
            config,
        })
    }
}
