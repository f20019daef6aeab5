//! # End-to-End Flows
//!
//! Every operation of the asset registry driven through the gateway of a
//! full in-process node.

#[cfg(test)]
mod tests {
    use super::super::support::{create_request, node, update_request};
    use al_04_submission_gateway::{ErrorKind, CREATE_ASSET, READ_ASSET};
    use shared_types::{Amount, ContractErrorCode};

    // =============================================================================
    // SCENARIO
    // =============================================================================

    #[tokio::test]
    async fn test_d001_lifecycle() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.create_asset(&create_request("D001", Amount::from_major(1000)))
            .await
            .unwrap();
        let created = gw.read_asset("D001").await.unwrap();
        assert_eq!(created.balance, Amount::from_major(1000));
        assert_eq!(created.trans_type, "INITIAL");

        gw.update_asset(
            "D001",
            &update_request(Amount::from_major(900), Amount::from_major(100), "DEBIT"),
        )
        .await
        .unwrap();
        let updated = gw.read_asset("D001").await.unwrap();
        assert_eq!(updated.balance, Amount::from_major(900));
        assert_eq!(updated.trans_type, "DEBIT");
        assert_eq!(updated.trans_amount, Amount::from_major(100));

        gw.delete_asset("D001").await.unwrap();
        assert!(!gw.asset_exists("D001").await.unwrap());

        let history = gw.get_asset_history("D001").await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history[2].is_deleted);
        assert!(history[2].asset.is_none());
        assert_eq!(history[0].asset.as_ref().unwrap().balance, Amount::from_major(1000));
        assert_eq!(history[1].asset.as_ref().unwrap().balance, Amount::from_major(900));

        runtime.shutdown().await;
    }

    // =============================================================================
    // SEEDING
    // =============================================================================

    #[tokio::test]
    async fn test_init_ledger_seeds_two_dealers() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.init_ledger().await.unwrap();
        let assets = gw.get_all_assets().await.unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].dealer_id, "D001");
        assert_eq!(assets[0].balance, Amount::from_major(1000));
        assert_eq!(assets[1].dealer_id, "D002");
        assert_eq!(assets[1].balance, Amount::from_major(2000));
        assert!(assets.iter().all(|a| a.status == "ACTIVE"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_init_ledger_twice_fails_already_exists() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.init_ledger().await.unwrap();
        let err = gw.init_ledger().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EndorsementRejected);
        assert_eq!(err.contract_code(), Some(ContractErrorCode::AlreadyExists));
        assert_eq!(err.http_status(), 400);
        assert_eq!(gw.get_all_assets().await.unwrap().len(), 2);

        runtime.shutdown().await;
    }

    // =============================================================================
    // RE-CREATION
    // =============================================================================

    #[tokio::test]
    async fn test_recreate_after_delete_extends_history() {
        let runtime = node().await;
        let gw = runtime.gateway();

        gw.create_asset(&create_request("D010", Amount::from_major(10)))
            .await
            .unwrap();
        gw.delete_asset("D010").await.unwrap();
        gw.create_asset(&create_request("D010", Amount::from_major(20)))
            .await
            .unwrap();

        let asset = gw.read_asset("D010").await.unwrap();
        assert_eq!(asset.balance, Amount::from_major(20));

        let history = gw.get_asset_history("D010").await.unwrap();
        let deleted: Vec<_> = history.iter().map(|h| h.is_deleted).collect();
        assert_eq!(deleted, vec![false, true, false]);

        runtime.shutdown().await;
    }

    // =============================================================================
    // RAW INVOCATION
    // =============================================================================

    #[tokio::test]
    async fn test_invoke_with_string_arguments() {
        let runtime = node().await;
        let gw = runtime.gateway();

        let args: Vec<String> = ["D020", "777", "0000", "12.5", "ACTIVE", "INITIAL", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        gw.invoke(CREATE_ASSET, &args).await.unwrap();

        let payload = gw.invoke(READ_ASSET, &["D020".to_string()]).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["DEALERID"], "D020");
        assert_eq!(json["BALANCE"], 12.5);
        assert_eq!(json["TRANSAMOUNT"], 12.5);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_bad_amount_is_invalid_argument() {
        let runtime = node().await;
        let gw = runtime.gateway();

        let args: Vec<String> = ["D021", "777", "0000", "12.345", "ACTIVE", "INITIAL", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = gw.invoke(CREATE_ASSET, &args).await.unwrap_err();

        assert_eq!(err.contract_code(), Some(ContractErrorCode::InvalidArgument));
        assert_eq!(err.http_status(), 400);
        assert!(!gw.asset_exists("D021").await.unwrap());

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_failure_body_for_front_door() {
        let runtime = node().await;
        let gw = runtime.gateway();

        let err = gw.read_asset("D404").await.unwrap_err();
        let body = serde_json::to_value(err.body()).unwrap();

        assert_eq!(err.http_status(), 404);
        assert_eq!(body["kind"], "NOT_FOUND");
        assert!(body["reason"].as_str().unwrap().contains("D404"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_dealer_id_is_absent() {
        let runtime = node().await;
        let gw = runtime.gateway();
        gw.init_ledger().await.unwrap();

        assert!(!gw.asset_exists("").await.unwrap());
        assert_eq!(gw.read_asset("").await.unwrap_err().kind(), ErrorKind::NotFound);

        let update = gw
            .update_asset("", &update_request(Amount::ZERO, Amount::ZERO, "DEBIT"))
            .await
            .unwrap_err();
        assert_eq!(update.contract_code(), Some(ContractErrorCode::NotFound));
        let delete = gw.delete_asset("").await.unwrap_err();
        assert_eq!(delete.contract_code(), Some(ContractErrorCode::NotFound));
        assert!(gw.get_asset_history("").await.unwrap().is_empty());

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_balance_past_exact_range_is_refused() {
        let runtime = node().await;
        let gw = runtime.gateway();

        let err = gw
            .create_asset(&create_request("D022", Amount::from_minor(9_007_199_254_740_993)))
            .await
            .unwrap_err();
        assert_eq!(err.contract_code(), Some(ContractErrorCode::InvalidArgument));
        assert!(!gw.asset_exists("D022").await.unwrap());

        gw.create_asset(&create_request("D023", Amount::MAX)).await.unwrap();
        assert_eq!(gw.read_asset("D023").await.unwrap().balance, Amount::MAX);

        runtime.shutdown().await;
    }
}
