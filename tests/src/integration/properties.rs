//! # Registry Properties
//!
//! Invariants of the asset registry checked against a live node, some over
//! generated balances and dealer ids.

#[cfg(test)]
mod tests {
    use super::super::support::{config, create_request, node, update_request};
    use al_04_submission_gateway::ErrorKind;
    use ledger_runtime::LedgerRuntime;
    use proptest::prelude::*;
    use shared_types::{Amount, ContractErrorCode};

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn created_asset_reads_back(
            id in "D[0-9]{3}",
            minor in 0i64..100_000_000,
        ) {
            let balance = Amount::from_minor(minor);
            let asset = block_on(async {
                let runtime = LedgerRuntime::new(config()).unwrap();
                let gw = runtime.gateway();
                gw.create_asset(&create_request(&id, balance)).await.unwrap();
                let asset = gw.read_asset(&id).await.unwrap();
                runtime.shutdown().await;
                asset
            });

            prop_assert_eq!(&asset.dealer_id, &id);
            prop_assert_eq!(asset.balance, balance);
            prop_assert_eq!(asset.trans_amount, asset.balance);
            prop_assert_eq!(asset.created_at, asset.updated_at);
        }

        #[test]
        fn update_preserves_identity(
            first in 0i64..1_000_000,
            second in 0i64..1_000_000,
        ) {
            let (before, after) = block_on(async {
                let runtime = LedgerRuntime::new(config()).unwrap();
                let gw = runtime.gateway();
                gw.create_asset(&create_request("D100", Amount::from_minor(first))).await.unwrap();
                let before = gw.read_asset("D100").await.unwrap();
                gw.update_asset(
                    "D100",
                    &update_request(Amount::from_minor(second), Amount::from_minor(first - second), "ADJUST"),
                )
                .await
                .unwrap();
                let after = gw.read_asset("D100").await.unwrap();
                runtime.shutdown().await;
                (before, after)
            });

            prop_assert_eq!(&after.dealer_id, &before.dealer_id);
            prop_assert_eq!(&after.msisdn, &before.msisdn);
            prop_assert_eq!(&after.mpin, &before.mpin);
            prop_assert_eq!(after.created_at, before.created_at);
            prop_assert!(after.updated_at >= before.updated_at);
            prop_assert_eq!(after.balance, Amount::from_minor(second));
        }
    }

    #[tokio::test]
    async fn test_double_create_keeps_first_value() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.create_asset(&create_request("D200", Amount::from_major(1)))
            .await
            .unwrap();
        let first = gw.read_asset("D200").await.unwrap();

        let err = gw
            .create_asset(&create_request("D200", Amount::from_major(2)))
            .await
            .unwrap_err();
        assert_eq!(err.contract_code(), Some(ContractErrorCode::AlreadyExists));
        assert_eq!(gw.read_asset("D200").await.unwrap(), first);
        assert_eq!(gw.get_asset_history("D200").await.unwrap().len(), 1);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_absent_key_not_found_everywhere() {
        let runtime = node().await;
        let gw = runtime.gateway();

        let read = gw.read_asset("D300").await.unwrap_err();
        assert_eq!(read.kind(), ErrorKind::NotFound);

        let update = gw
            .update_asset(
                "D300",
                &update_request(Amount::ZERO, Amount::ZERO, "DEBIT"),
            )
            .await
            .unwrap_err();
        assert_eq!(update.contract_code(), Some(ContractErrorCode::NotFound));
        assert_eq!(update.http_status(), 404);

        let delete = gw.delete_asset("D300").await.unwrap_err();
        assert_eq!(delete.contract_code(), Some(ContractErrorCode::NotFound));

        assert!(gw.get_asset_history("D300").await.unwrap().is_empty());
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_delete_hides_asset() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.init_ledger().await.unwrap();
        gw.delete_asset("D001").await.unwrap();

        assert!(!gw.asset_exists("D001").await.unwrap());
        let ids: Vec<_> = gw
            .get_all_assets()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.dealer_id)
            .collect();
        assert_eq!(ids, vec!["D002"]);

        let history = gw.get_asset_history("D001").await.unwrap();
        assert!(history.last().unwrap().is_deleted);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_history_counts_every_change_in_order() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.create_asset(&create_request("D400", Amount::from_major(100)))
            .await
            .unwrap();
        for step in 1..=3 {
            gw.update_asset(
                "D400",
                &update_request(
                    Amount::from_major(100 - step * 10),
                    Amount::from_major(10),
                    "DEBIT",
                ),
            )
            .await
            .unwrap();
        }
        gw.delete_asset("D400").await.unwrap();

        let history = gw.get_asset_history("D400").await.unwrap();
        assert_eq!(history.len(), 5);

        let balances: Vec<_> = history
            .iter()
            .filter_map(|h| h.asset.as_ref().map(|a| a.balance))
            .collect();
        assert_eq!(
            balances,
            vec![
                Amount::from_major(100),
                Amount::from_major(90),
                Amount::from_major(80),
                Amount::from_major(70),
            ]
        );
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let runtime = node().await;
        let gw = runtime.gateway();
        gw.init_ledger().await.unwrap();

        let first = (gw.read_asset("D002").await.unwrap(), gw.get_all_assets().await.unwrap());
        let second = (gw.read_asset("D002").await.unwrap(), gw.get_all_assets().await.unwrap());
        assert_eq!(first, second);

        runtime.shutdown().await;
    }
}
