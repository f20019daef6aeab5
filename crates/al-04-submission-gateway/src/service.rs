//! # Gateway Service
//!
//! Classifies each call and drives it through the ledger with one budget per
//! phase.
//!
//! ```text
//! evaluate: ──evaluate (evaluate budget)──→ payload
//!
//! submit:   ──endorse (endorse budget)──→ submit (submit budget)──→ commit status ──→ payload
//!           └───────────────────── commit_status budget, end to end ──────────────┘
//! ```
//!
//! A budget that runs out fails the call locally. Nothing is cancelled on
//! the ledger and nothing is retried here.

use crate::domain::{
    get_method_info, CommitPhase, ConfigError, CreateAssetRequest, GatewayConfig, GatewayError,
    MethodInfo, MethodKind, UpdateAssetRequest, ASSET_EXISTS, CREATE_ASSET, DELETE_ASSET,
    GET_ALL_ASSETS, GET_ASSET_HISTORY, INIT_LEDGER, READ_ASSET, UPDATE_ASSET,
};
use crate::ports::{ChannelError, LedgerChannel};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use shared_types::{Asset, HistoryEntry, Proposal};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

/// Gateway statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GatewayStats {
    /// Evaluations answered.
    pub evaluations: u64,
    /// Submits that committed valid.
    pub commits: u64,
    /// Calls that failed for any reason other than a timeout.
    pub failures: u64,
    /// Calls that ran out of budget.
    pub timeouts: u64,
}

/// Client-side entry point to one contract on one channel.
pub struct Gateway<C> {
    channel: C,
    config: GatewayConfig,
    closed: AtomicBool,
    stats: Mutex<GatewayStats>,
}

impl<C: LedgerChannel> Gateway<C> {
    pub fn new(channel: C, config: GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            channel = %config.channel,
            contract = %config.contract,
            identity = %config.identity,
            "Gateway connected"
        );
        Ok(Self {
            channel,
            config,
            closed: AtomicBool::new(false),
            stats: Mutex::new(GatewayStats::default()),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn stats(&self) -> GatewayStats {
        self.stats.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Refuse every further call. In-flight calls run to completion.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("Gateway closed");
        }
    }

    /// Run a function on one peer without changing state.
    #[instrument(skip_all, fields(function = %function))]
    pub async fn evaluate_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError> {
        let result = self.evaluate_inner(function, args).await;
        self.observe(MethodKind::Evaluate, result)
    }

    /// Endorse, order and commit a function. Returns the endorsed payload
    /// once the transaction commits valid.
    #[instrument(skip_all, fields(function = %function))]
    pub async fn submit_transaction(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, GatewayError> {
        let result = self.submit_inner(function, args).await;
        self.observe(MethodKind::Submit, result)
    }

    /// Route a call by its registered kind.
    pub async fn invoke(&self, function: &str, args: &[String]) -> Result<Vec<u8>, GatewayError> {
        match lookup(function)?.kind {
            MethodKind::Evaluate => self.evaluate_transaction(function, args).await,
            MethodKind::Submit => self.submit_transaction(function, args).await,
        }
    }

    // =========================================================================
    // TYPED OPERATIONS
    // =========================================================================

    pub async fn init_ledger(&self) -> Result<(), GatewayError> {
        self.submit_transaction(INIT_LEDGER, &[]).await.map(drop)
    }

    pub async fn create_asset(&self, request: &CreateAssetRequest) -> Result<(), GatewayError> {
        request.validate()?;
        self.submit_transaction(CREATE_ASSET, &request.to_args())
            .await
            .map(drop)
    }

    pub async fn read_asset(&self, dealer_id: &str) -> Result<Asset, GatewayError> {
        let payload = self
            .evaluate_transaction(READ_ASSET, &[dealer_id.to_string()])
            .await?;
        decode(&payload)
    }

    pub async fn update_asset(
        &self,
        dealer_id: &str,
        request: &UpdateAssetRequest,
    ) -> Result<(), GatewayError> {
        request.validate()?;
        self.submit_transaction(UPDATE_ASSET, &request.to_args(dealer_id))
            .await
            .map(drop)
    }

    pub async fn delete_asset(&self, dealer_id: &str) -> Result<(), GatewayError> {
        self.submit_transaction(DELETE_ASSET, &[dealer_id.to_string()])
            .await
            .map(drop)
    }

    pub async fn asset_exists(&self, dealer_id: &str) -> Result<bool, GatewayError> {
        let payload = self
            .evaluate_transaction(ASSET_EXISTS, &[dealer_id.to_string()])
            .await?;
        decode(&payload)
    }

    pub async fn get_all_assets(&self) -> Result<Vec<Asset>, GatewayError> {
        let payload = self.evaluate_transaction(GET_ALL_ASSETS, &[]).await?;
        decode(&payload)
    }

    pub async fn get_asset_history(&self, dealer_id: &str) -> Result<Vec<HistoryEntry>, GatewayError> {
        let payload = self
            .evaluate_transaction(GET_ASSET_HISTORY, &[dealer_id.to_string()])
            .await?;
        decode(&payload)
    }

    // =========================================================================
    // PHASES
    // =========================================================================

    async fn evaluate_inner(&self, function: &str, args: &[String]) -> Result<Vec<u8>, GatewayError> {
        let proposal = self.prepare(function, args)?;
        let budget = self.config.timeouts.evaluate;

        match timeout(budget, self.channel.evaluate(&proposal)).await {
            Err(_) => Err(GatewayError::EvaluateTimeout(budget)),
            Ok(Err(e)) => Err(from_channel(e)),
            Ok(Ok(payload)) => Ok(payload),
        }
    }

    async fn submit_inner(&self, function: &str, args: &[String]) -> Result<Vec<u8>, GatewayError> {
        let proposal = self.prepare(function, args)?;
        let tx_id = proposal.tx_id.clone();
        let budgets = self.config.timeouts;
        let deadline = Instant::now() + budgets.commit_status;

        let endorsed = match timeout(budgets.endorse, self.channel.endorse(proposal)).await {
            Err(_) => return Err(GatewayError::EndorseTimeout(budgets.endorse)),
            Ok(Err(ChannelError::Contract { code, message })) => {
                return Err(GatewayError::EndorsementRejected { code, message })
            }
            Ok(Err(e)) => return Err(from_channel(e)),
            Ok(Ok(tx)) => tx,
        };
        debug!(tx_id = tx_id.short(), "Endorsed");
        let payload = endorsed.response_payload.clone();

        let submit_budget = budgets
            .submit
            .min(deadline.saturating_duration_since(Instant::now()));
        match timeout(submit_budget, self.channel.submit(endorsed)).await {
            Err(_) => {
                return Err(GatewayError::CommitTimeout {
                    tx_id,
                    phase: CommitPhase::Submit,
                    budget: submit_budget,
                })
            }
            Ok(Err(e)) => return Err(from_channel(e)),
            Ok(Ok(())) => {}
        }
        debug!(tx_id = tx_id.short(), "Submitted to orderer");

        let status = match timeout_at(deadline, self.channel.commit_status(&tx_id)).await {
            Err(_) => {
                return Err(GatewayError::CommitTimeout {
                    tx_id,
                    phase: CommitPhase::CommitStatus,
                    budget: budgets.commit_status,
                })
            }
            Ok(Err(e)) => return Err(from_channel(e)),
            Ok(Ok(status)) => status,
        };

        if !status.is_success() {
            return Err(GatewayError::CommitFailed {
                tx_id,
                code: status.code,
            });
        }

        info!(
            tx_id = tx_id.short(),
            block_num = status.block_num,
            "Transaction committed"
        );
        Ok(payload)
    }

    /// Check the call against the registry and build its proposal.
    fn prepare(&self, function: &str, args: &[String]) -> Result<Proposal, GatewayError> {
        if self.is_closed() {
            return Err(GatewayError::Unavailable("gateway closed".into()));
        }

        let method = lookup(function)?;
        if args.len() != method.arity {
            return Err(GatewayError::InvalidArgument(format!(
                "{} expects {} arguments, got {}",
                method.name,
                method.arity,
                args.len()
            )));
        }

        Ok(Proposal::new(
            self.config.channel.clone(),
            self.config.contract.clone(),
            function,
            args.to_vec(),
            self.config.identity.clone(),
        ))
    }

    fn observe<T>(
        &self,
        kind: MethodKind,
        result: Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let mut stats = self.stats.lock();
        match &result {
            Ok(_) => match kind {
                MethodKind::Evaluate => stats.evaluations += 1,
                MethodKind::Submit => stats.commits += 1,
            },
            Err(e) => {
                if matches!(
                    e,
                    GatewayError::EvaluateTimeout(_)
                        | GatewayError::EndorseTimeout(_)
                        | GatewayError::CommitTimeout { .. }
                ) {
                    stats.timeouts += 1;
                } else {
                    stats.failures += 1;
                }
                warn!(
                    %kind,
                    error_kind = ?e.kind(),
                    retryable = e.is_retryable(),
                    outcome_unknown = e.outcome_unknown(),
                    "Call failed: {}",
                    e
                );
            }
        }
        result
    }
}

fn lookup(function: &str) -> Result<&'static MethodInfo, GatewayError> {
    get_method_info(function)
        .ok_or_else(|| GatewayError::InvalidArgument(format!("unknown function {function}")))
}

fn from_channel(e: ChannelError) -> GatewayError {
    match e {
        ChannelError::Contract { code, message } => GatewayError::Contract { code, message },
        ChannelError::Unavailable(reason) => GatewayError::Unavailable(reason),
        ChannelError::Ordering(reason) => GatewayError::OrdererRejected(reason),
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(payload).map_err(|e| GatewayError::Decode(e.to_string()))
}
