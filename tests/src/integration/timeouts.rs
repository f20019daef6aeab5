//! # Call Budgets
//!
//! A stalling wrapper around the in-process channel makes one phase hang.
//! The gateway must fail locally with the right kind, and whatever already
//! reached the orderer must still commit.

#[cfg(test)]
mod tests {
    use super::super::support::create_request;
    use al_01_world_state::{InMemoryWorldState, WorldStateStore};
    use al_02_asset_contract::{ContractService, ServiceConfig};
    use al_03_transaction_ordering::{OrderingConfig, OrderingHandle, OrderingService};
    use al_04_submission_gateway::{
        ChannelError, CommitPhase, ErrorKind, Gateway, GatewayConfig, GatewayError,
        LedgerChannel, TimeoutConfig,
    };
    use async_trait::async_trait;
    use ledger_runtime::InProcessChannel;
    use shared_types::{Amount, CommitStatus, EndorsedTransaction, Proposal, TxId};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stall {
        Evaluate,
        Endorse,
        CommitStatus,
    }

    struct StallingChannel {
        inner: InProcessChannel,
        stall: Stall,
    }

    impl StallingChannel {
        async fn gate(&self, phase: Stall) {
            if self.stall == phase {
                std::future::pending::<()>().await;
            }
        }
    }

    #[async_trait]
    impl LedgerChannel for StallingChannel {
        async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, ChannelError> {
            self.gate(Stall::Evaluate).await;
            self.inner.evaluate(proposal).await
        }

        async fn endorse(&self, proposal: Proposal) -> Result<EndorsedTransaction, ChannelError> {
            self.gate(Stall::Endorse).await;
            self.inner.endorse(proposal).await
        }

        async fn submit(&self, tx: EndorsedTransaction) -> Result<(), ChannelError> {
            self.inner.submit(tx).await
        }

        async fn commit_status(&self, tx_id: &TxId) -> Result<CommitStatus, ChannelError> {
            self.gate(Stall::CommitStatus).await;
            self.inner.commit_status(tx_id).await
        }
    }

    struct Fixture {
        store: Arc<dyn WorldStateStore>,
        orderer: OrderingHandle,
        gateway: Gateway<StallingChannel>,
        /// Unstalled gateway over the same ledger, for checking outcomes.
        observer: Gateway<InProcessChannel>,
    }

    fn budgets() -> GatewayConfig {
        GatewayConfig {
            timeouts: TimeoutConfig {
                evaluate: Duration::from_millis(50),
                endorse: Duration::from_millis(50),
                submit: Duration::from_millis(50),
                commit_status: Duration::from_millis(200),
            },
            ..Default::default()
        }
    }

    fn fixture(stall: Stall) -> Fixture {
        let store: Arc<dyn WorldStateStore> = Arc::new(InMemoryWorldState::new());
        let peer = Arc::new(ContractService::new(Arc::clone(&store), ServiceConfig::default()));
        let orderer = OrderingService::spawn(
            OrderingConfig {
                batch_timeout_ms: 10,
                ..Default::default()
            },
            Arc::clone(&store),
        )
        .unwrap();

        let stalling = StallingChannel {
            inner: InProcessChannel::new(Arc::clone(&peer), orderer.clone()),
            stall,
        };
        Fixture {
            store,
            orderer: orderer.clone(),
            gateway: Gateway::new(stalling, budgets()).unwrap(),
            observer: Gateway::new(InProcessChannel::new(peer, orderer), budgets()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_evaluate_timeout() {
        let f = fixture(Stall::Evaluate);

        let err = f.gateway.read_asset("D001").await.unwrap_err();
        assert_eq!(err, GatewayError::EvaluateTimeout(Duration::from_millis(50)));
        assert!(err.is_retryable());

        f.orderer.shutdown().await;
    }

    #[tokio::test]
    async fn test_endorse_timeout_has_no_side_effects() {
        let f = fixture(Stall::Endorse);

        let err = f
            .gateway
            .create_asset(&create_request("D500", Amount::from_major(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndorseTimeout);
        assert!(!err.outcome_unknown());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!f.observer.asset_exists("D500").await.unwrap());
        assert_eq!(f.store.height().unwrap(), 0);

        f.orderer.shutdown().await;
    }

    #[tokio::test]
    async fn test_commit_status_timeout_still_commits() {
        let f = fixture(Stall::CommitStatus);

        let err = f
            .gateway
            .create_asset(&create_request("D501", Amount::from_major(1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::CommitTimeout {
                phase: CommitPhase::CommitStatus,
                ..
            }
        ));
        assert!(err.outcome_unknown());
        assert!(!err.is_retryable());

        // The transaction was ordered before the budget ran out.
        assert!(f.observer.asset_exists("D501").await.unwrap());

        f.orderer.shutdown().await;
    }

    #[tokio::test]
    async fn test_commit_wait_released_on_shutdown() {
        let store: Arc<dyn WorldStateStore> = Arc::new(InMemoryWorldState::new());
        let peer = Arc::new(ContractService::new(Arc::clone(&store), ServiceConfig::default()));
        // Never cuts on its own within the test.
        let orderer = OrderingService::spawn(
            OrderingConfig {
                batch_timeout_ms: 60_000,
                ..Default::default()
            },
            Arc::clone(&store),
        )
        .unwrap();
        let gateway = Arc::new(
            Gateway::new(
                InProcessChannel::new(peer, orderer.clone()),
                GatewayConfig::default(),
            )
            .unwrap(),
        );

        let pending = {
            let gateway = Arc::clone(&gateway);
            tokio::spawn(async move {
                gateway
                    .create_asset(&create_request("D502", Amount::from_major(1)))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        orderer.shutdown().await;

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(store.get_versioned("D502").unwrap().is_none());
    }
}
