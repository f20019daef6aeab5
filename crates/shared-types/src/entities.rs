//! # Core Domain Entities
//!
//! - [`Asset`]: the unit of record, one per dealer, keyed by `dealer_id`.
//! - [`HistoryEntry`]: one committed mutation of an asset key.

use crate::amount::Amount;
use crate::ledger::TxId;
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ASSET
// =============================================================================

/// A dealer account record.
///
/// The JSON form uses the upper-case keys clients already depend on
/// (`DEALERID`, `MSISDN`, ...). `dealer_id`, `msisdn`, `mpin` and
/// `created_at` never change after creation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Store key. Globally unique and immutable.
    #[serde(rename = "DEALERID")]
    pub dealer_id: String,
    /// Subscriber number.
    #[serde(rename = "MSISDN")]
    pub msisdn: String,
    /// Opaque PIN. Stored and returned as given, never logged.
    #[serde(rename = "MPIN")]
    pub mpin: String,
    /// Current balance.
    #[serde(rename = "BALANCE")]
    pub balance: Amount,
    /// Free-form status (`ACTIVE`, ...).
    #[serde(rename = "STATUS")]
    pub status: String,
    /// Amount of the last transaction applied.
    #[serde(rename = "TRANSAMOUNT")]
    pub trans_amount: Amount,
    /// Kind of the last transaction applied.
    #[serde(rename = "TRANSTYPE")]
    pub trans_type: String,
    /// Free-form remarks.
    #[serde(rename = "REMARKS")]
    pub remarks: String,
    /// Set once at creation.
    #[serde(rename = "CREATEDAT")]
    pub created_at: Timestamp,
    /// Refreshed on every successful mutation.
    #[serde(rename = "UPDATEDAT")]
    pub updated_at: Timestamp,
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("dealer_id", &self.dealer_id)
            .field("msisdn", &self.msisdn)
            .field("mpin", &"<redacted>")
            .field("balance", &self.balance)
            .field("status", &self.status)
            .field("trans_amount", &self.trans_amount)
            .field("trans_type", &self.trans_type)
            .field("remarks", &self.remarks)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// One committed mutation of a key, as returned by `GetAssetHistory`.
///
/// `asset` is `None` (JSON `null`) for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Transaction that produced this entry.
    pub tx_id: TxId,
    /// Proposal timestamp of that transaction.
    pub timestamp: Timestamp,
    /// True when the transaction deleted the key.
    pub is_deleted: bool,
    /// Value written, absent for deletions.
    pub asset: Option<Asset>,
}
