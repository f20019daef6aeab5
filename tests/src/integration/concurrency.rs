//! # Concurrent Submits
//!
//! Simulations race against each other and against commits; MVCC
//! validation at commit decides the winner.

#[cfg(test)]
mod tests {
    use super::super::support::{config, create_request, node, update_request};
    use al_04_submission_gateway::{ErrorKind, GatewayError};
    use ledger_runtime::LedgerRuntime;
    use shared_types::{Amount, ValidationCode};
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn test_conflicting_creates_one_commits() {
        let runtime = node().await;
        let gw = runtime.gateway();

        // Both endorse against the same empty snapshot before either commits.
        let req_a = create_request("D777", Amount::from_major(1));
        let req_b = create_request("D777", Amount::from_major(2));
        let (a, b) = tokio::join!(gw.create_asset(&req_a), gw.create_asset(&req_b),);

        let (winner, loser) = match (a, b) {
            (Ok(()), Err(e)) => (Amount::from_major(1), e),
            (Err(e), Ok(())) => (Amount::from_major(2), e),
            other => panic!("expected exactly one commit, got {other:?}"),
        };
        assert!(matches!(
            loser,
            GatewayError::CommitFailed {
                code: ValidationCode::MvccReadConflict,
                ..
            }
        ));
        assert_eq!(loser.kind(), ErrorKind::CommitFailed);
        assert!(loser.is_retryable());

        assert_eq!(gw.read_asset("D777").await.unwrap().balance, winner);
        assert_eq!(gw.get_asset_history("D777").await.unwrap().len(), 1);
        assert_eq!(runtime.container().orderer.stats().invalid_transactions, 1);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_conflicting_updates_then_retry() {
        let runtime = node().await;
        let gw = runtime.gateway();
        gw.create_asset(&create_request("D778", Amount::from_major(100)))
            .await
            .unwrap();

        let debit = update_request(Amount::from_major(90), Amount::from_major(10), "DEBIT");
        let credit = update_request(Amount::from_major(150), Amount::from_major(50), "CREDIT");
        let (a, b) = tokio::join!(
            gw.update_asset("D778", &debit),
            gw.update_asset("D778", &credit),
        );
        let failed = [&a, &b].iter().filter(|r| r.is_err()).count();
        assert_eq!(failed, 1);

        // The loser retries against the new state and commits.
        let retry = if a.is_err() { &debit } else { &credit };
        gw.update_asset("D778", retry).await.unwrap();

        assert_eq!(gw.read_asset("D778").await.unwrap().balance, retry.balance);
        assert_eq!(gw.get_asset_history("D778").await.unwrap().len(), 3);

        runtime.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_distinct_creates_all_commit() {
        let mut cfg = config();
        cfg.ordering.max_message_count = 8;
        let runtime = LedgerRuntime::new(cfg).unwrap();
        let gw = runtime.gateway();

        let mut tasks = JoinSet::new();
        for i in 0..32 {
            let gw = gw.clone();
            tasks.spawn(async move {
                gw.create_asset(&create_request(&format!("P{i:03}"), Amount::from_major(i)))
                    .await
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let assets = gw.get_all_assets().await.unwrap();
        assert_eq!(assets.len(), 32);
        assert_eq!(assets[0].dealer_id, "P000");
        assert_eq!(assets[31].balance, Amount::from_major(31));
        assert_eq!(runtime.container().orderer.stats().valid_transactions, 32);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_reads_do_not_wait_for_pending_commits() {
        let mut cfg = config();
        cfg.ordering.batch_timeout_ms = 200;
        let runtime = LedgerRuntime::new(cfg).unwrap();
        let gw = runtime.gateway();

        let submit = {
            let gw = gw.clone();
            tokio::spawn(async move {
                gw.create_asset(&create_request("D779", Amount::from_major(5)))
                    .await
            })
        };
        tokio::task::yield_now().await;

        // Block not cut yet: committed state is still empty.
        assert!(!gw.asset_exists("D779").await.unwrap());

        submit.await.unwrap().unwrap();
        assert!(gw.asset_exists("D779").await.unwrap());

        runtime.shutdown().await;
    }
}
