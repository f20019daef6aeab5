//! # Contract Service
//!
//! The endorsing peer. Each request gets its own snapshot and simulator, so
//! any number of simulations run side by side while the committer keeps
//! writing.
//!
//! ## Flow
//!
//! ```text
//! Proposal ──check target──→ snapshot ──→ TxSimulator ──→ AssetContract::invoke
//!                                                               │
//!                        evaluate: payload only ←───────────────┤
//!                        endorse:  EndorsedTransaction ←────────┘
//! ```

use crate::domain::AssetContract;
use crate::errors::ContractError;
use crate::ports::EndorserApi;
use al_01_world_state::{TxSimulator, WorldStateStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{EndorsedTransaction, Proposal};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Contract service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Channel this peer serves.
    pub channel: String,
    /// Name the contract is installed under.
    pub contract_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            channel: "mychannel".to_string(),
            contract_name: "asset".to_string(),
        }
    }
}

/// Statistics for the contract service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Evaluations that returned a payload.
    pub evaluations: u64,
    /// Proposals endorsed.
    pub endorsements: u64,
    /// Proposals the contract or the target check refused.
    pub rejections: u64,
}

pub struct ContractService {
    config: ServiceConfig,
    store: Arc<dyn WorldStateStore>,
    contract: AssetContract,
    stats: Mutex<ServiceStats>,
}

impl ContractService {
    pub fn new(store: Arc<dyn WorldStateStore>, config: ServiceConfig) -> Self {
        Self {
            config,
            store,
            contract: AssetContract::new(),
            stats: Mutex::new(ServiceStats::default()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    fn check_target(&self, proposal: &Proposal) -> Result<(), ContractError> {
        if proposal.channel != self.config.channel || proposal.contract != self.config.contract_name
        {
            return Err(ContractError::InvalidArgument(format!(
                "contract {}/{} is not installed on this peer",
                proposal.channel, proposal.contract
            )));
        }
        Ok(())
    }

    fn simulate(&self, proposal: &Proposal) -> Result<(Vec<u8>, TxSimulator), ContractError> {
        self.check_target(proposal)?;

        let snapshot = self.store.snapshot()?;
        let mut sim = TxSimulator::new(snapshot, proposal.tx_id.clone(), proposal.timestamp);
        let payload = self
            .contract
            .invoke(&mut sim, &proposal.function, &proposal.args)?;

        debug!(
            snapshot_height = sim.snapshot_height(),
            payload_len = payload.len(),
            "Simulation complete"
        );
        Ok((payload, sim))
    }

    fn rejected(&self, err: ContractError) -> ContractError {
        self.stats.lock().rejections += 1;
        warn!(error = %err, "Proposal rejected");
        err
    }
}

#[async_trait]
impl EndorserApi for ContractService {
    #[instrument(skip(self, proposal), fields(tx_id = proposal.tx_id.short(), function = %proposal.function))]
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, ContractError> {
        let (payload, _discarded) = self.simulate(proposal).map_err(|e| self.rejected(e))?;
        self.stats.lock().evaluations += 1;
        Ok(payload)
    }

    #[instrument(skip(self, proposal), fields(tx_id = proposal.tx_id.short(), function = %proposal.function))]
    async fn endorse(&self, proposal: Proposal) -> Result<EndorsedTransaction, ContractError> {
        let (payload, sim) = self.simulate(&proposal).map_err(|e| self.rejected(e))?;
        let rw_set = sim.into_rw_set();

        info!(
            reads = rw_set.reads.len(),
            writes = rw_set.writes.len(),
            "Proposal endorsed"
        );
        self.stats.lock().endorsements += 1;

        Ok(EndorsedTransaction {
            proposal,
            rw_set,
            response_payload: payload,
        })
    }
}
