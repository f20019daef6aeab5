//! Request bodies and argument marshaling.
//!
//! Contract functions take positional strings. Amounts always travel with
//! exactly two decimals so the contract parses the value the caller meant.

use crate::domain::error::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Render an amount as a contract argument (`1000` becomes `"1000.00"`).
pub fn format_amount(amount: Amount) -> String {
    amount.to_string()
}

/// Body of a create request. Keys match the stored asset's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAssetRequest {
    #[serde(rename = "DEALERID")]
    pub dealer_id: String,
    #[serde(rename = "MSISDN")]
    pub msisdn: String,
    #[serde(rename = "MPIN")]
    pub mpin: String,
    #[serde(rename = "BALANCE")]
    pub balance: Amount,
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "TRANSTYPE")]
    pub trans_type: String,
    #[serde(rename = "REMARKS", default)]
    pub remarks: String,
}

impl CreateAssetRequest {
    /// Every field except `REMARKS` is required.
    pub fn validate(&self) -> Result<(), GatewayError> {
        require("DEALERID", &self.dealer_id)?;
        require("MSISDN", &self.msisdn)?;
        require("MPIN", &self.mpin)?;
        require("STATUS", &self.status)?;
        require("TRANSTYPE", &self.trans_type)
    }

    /// Arguments for `CreateAsset`, in contract order.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.dealer_id.clone(),
            self.msisdn.clone(),
            self.mpin.clone(),
            format_amount(self.balance),
            self.status.clone(),
            self.trans_type.clone(),
            self.remarks.clone(),
        ]
    }
}

/// Body of an update request. The dealer id comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAssetRequest {
    #[serde(rename = "BALANCE")]
    pub balance: Amount,
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "TRANSAMOUNT")]
    pub trans_amount: Amount,
    #[serde(rename = "TRANSTYPE")]
    pub trans_type: String,
    #[serde(rename = "REMARKS", default)]
    pub remarks: String,
}

impl UpdateAssetRequest {
    pub fn validate(&self) -> Result<(), GatewayError> {
        require("STATUS", &self.status)?;
        require("TRANSTYPE", &self.trans_type)
    }

    /// Arguments for `UpdateAsset`, in contract order.
    pub fn to_args(&self, dealer_id: &str) -> Vec<String> {
        vec![
            dealer_id.to_string(),
            format_amount(self.balance),
            self.status.clone(),
            format_amount(self.trans_amount),
            self.trans_type.clone(),
            self.remarks.clone(),
        ]
    }
}

fn require(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidArgument(format!(
            "{field} is required"
        )));
    }
    Ok(())
}
