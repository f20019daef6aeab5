//! Cross-crate flows through the gateway, the in-process channel, the
//! endorsing peer, the ordering service and the world state.

pub mod concurrency;
pub mod flows;
pub mod properties;
pub mod timeouts;

#[cfg(test)]
pub(crate) mod support {
    use al_04_submission_gateway::{CreateAssetRequest, UpdateAssetRequest};
    use ledger_runtime::{LedgerRuntime, RuntimeConfig};
    use shared_types::Amount;

    /// Runtime with short block cutting and an empty ledger.
    pub fn config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.init_ledger = false;
        config.ordering.batch_timeout_ms = 10;
        config
    }

    pub async fn node() -> LedgerRuntime {
        let runtime = LedgerRuntime::new(config()).unwrap();
        runtime.start().await.unwrap();
        runtime
    }

    pub fn create_request(dealer_id: &str, balance: Amount) -> CreateAssetRequest {
        CreateAssetRequest {
            dealer_id: dealer_id.to_string(),
            msisdn: "555".to_string(),
            mpin: "1111".to_string(),
            balance,
            status: "ACTIVE".to_string(),
            trans_type: "INITIAL".to_string(),
            remarks: "seed".to_string(),
        }
    }

    pub fn update_request(balance: Amount, trans_amount: Amount, trans_type: &str) -> UpdateAssetRequest {
        UpdateAssetRequest {
            balance,
            status: "ACTIVE".to_string(),
            trans_amount,
            trans_type: trans_type.to_string(),
            remarks: "withdrawal".to_string(),
        }
    }
}
