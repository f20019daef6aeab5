//! Inputs to the mutating contract functions.

use shared_types::Amount;

/// Fields supplied to `CreateAsset`. `trans_amount` is set to `balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub dealer_id: String,
    pub msisdn: String,
    pub mpin: String,
    pub balance: Amount,
    pub status: String,
    pub trans_type: String,
    pub remarks: String,
}

/// The five mutable fields overwritten by `UpdateAsset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpdate {
    pub balance: Amount,
    pub status: String,
    pub trans_amount: Amount,
    pub trans_type: String,
    pub remarks: String,
}

/// One of the records written by `InitLedger`.
pub(crate) struct SeedAsset {
    pub dealer_id: &'static str,
    pub msisdn: &'static str,
    pub mpin: &'static str,
    pub balance: Amount,
}

pub(crate) const SEED_STATUS: &str = "ACTIVE";
pub(crate) const SEED_TRANS_TYPE: &str = "INITIAL";
pub(crate) const SEED_REMARKS: &str = "Initial Balance";

pub(crate) const SEED_ASSETS: [SeedAsset; 2] = [
    SeedAsset {
        dealer_id: "D001",
        msisdn: "1234567890",
        mpin: "1234",
        balance: Amount::from_major(1000),
    },
    SeedAsset {
        dealer_id: "D002",
        msisdn: "1234567891",
        mpin: "5678",
        balance: Amount::from_major(2000),
    },
];
