//! # Asset Contract
//!
//! Deterministic state transitions over a [`TransactionContext`].
//!
//! ```text
//! ABSENT ──Create──→ PRESENT ──Update*──→ PRESENT ──Delete──→ ABSENT (tombstoned)
//!    ↑                                                              │
//!    └──────────────────────────Create──────────────────────────────┘
//! ```
//!
//! Timestamps come from the transaction context only. Two peers running the
//! same proposal against the same snapshot produce byte-identical writes.

use super::entities::{
    AssetUpdate, NewAsset, SEED_ASSETS, SEED_REMARKS, SEED_STATUS, SEED_TRANS_TYPE,
};
use super::functions::ContractFunction;
use crate::errors::ContractError;
use al_01_world_state::TransactionContext;
use chrono::SubsecRound;
use serde::Serialize;
use shared_types::{Amount, Asset, HistoryEntry, Timestamp};
use tracing::debug;

/// The asset registry contract. Holds no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetContract;

impl AssetContract {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch a named function with string arguments and return the JSON
    /// payload (empty for functions without a result).
    pub fn invoke(
        &self,
        ctx: &mut dyn TransactionContext,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let function: ContractFunction = function.parse().map_err(ContractError::InvalidArgument)?;
        if args.len() != function.arity() {
            return Err(ContractError::InvalidArgument(format!(
                "{function} expects {} argument(s), got {}",
                function.arity(),
                args.len()
            )));
        }

        debug!(function = %function, tx_id = ctx.tx_id().short(), "Invoking contract function");

        match function {
            ContractFunction::InitLedger => self.init_ledger(ctx).map(|()| Vec::new()),
            ContractFunction::CreateAsset => {
                let asset = NewAsset {
                    dealer_id: args[0].clone(),
                    msisdn: args[1].clone(),
                    mpin: args[2].clone(),
                    balance: parse_amount("balance", &args[3])?,
                    status: args[4].clone(),
                    trans_type: args[5].clone(),
                    remarks: args[6].clone(),
                };
                self.create_asset(ctx, asset).map(|()| Vec::new())
            }
            ContractFunction::ReadAsset => {
                let asset = self.read_asset(ctx, &args[0])?;
                encode(&args[0], &asset)
            }
            ContractFunction::UpdateAsset => {
                let update = AssetUpdate {
                    balance: parse_amount("balance", &args[1])?,
                    status: args[2].clone(),
                    trans_amount: parse_amount("transAmount", &args[3])?,
                    trans_type: args[4].clone(),
                    remarks: args[5].clone(),
                };
                self.update_asset(ctx, &args[0], update).map(|()| Vec::new())
            }
            ContractFunction::DeleteAsset => self.delete_asset(ctx, &args[0]).map(|()| Vec::new()),
            ContractFunction::AssetExists => {
                let exists = self.asset_exists(ctx, &args[0])?;
                encode(&args[0], &exists)
            }
            ContractFunction::GetAllAssets => {
                let assets = self.get_all_assets(ctx)?;
                encode("*", &assets)
            }
            ContractFunction::GetAssetHistory => {
                let history = self.get_asset_history(ctx, &args[0])?;
                encode(&args[0], &history)
            }
        }
    }

    /// Seed `D001` and `D002`. Fails with `AlreadyExists` once seeded.
    pub fn init_ledger(&self, ctx: &mut dyn TransactionContext) -> Result<(), ContractError> {
        let now = tx_time(ctx);
        for seed in &SEED_ASSETS {
            let asset = Asset {
                dealer_id: seed.dealer_id.to_string(),
                msisdn: seed.msisdn.to_string(),
                mpin: seed.mpin.to_string(),
                balance: seed.balance,
                status: SEED_STATUS.to_string(),
                trans_amount: Amount::ZERO,
                trans_type: SEED_TRANS_TYPE.to_string(),
                remarks: SEED_REMARKS.to_string(),
                created_at: now,
                updated_at: now,
            };
            self.insert_new(ctx, &asset)?;
        }
        Ok(())
    }

    pub fn create_asset(
        &self,
        ctx: &mut dyn TransactionContext,
        new: NewAsset,
    ) -> Result<(), ContractError> {
        let now = tx_time(ctx);
        let asset = Asset {
            dealer_id: new.dealer_id,
            msisdn: new.msisdn,
            mpin: new.mpin,
            balance: new.balance,
            status: new.status,
            trans_amount: new.balance,
            trans_type: new.trans_type,
            remarks: new.remarks,
            created_at: now,
            updated_at: now,
        };
        self.insert_new(ctx, &asset)
    }

    pub fn read_asset(
        &self,
        ctx: &mut dyn TransactionContext,
        dealer_id: &str,
    ) -> Result<Asset, ContractError> {
        let bytes = lookup(ctx, dealer_id)?
            .ok_or_else(|| ContractError::NotFound(dealer_id.to_string()))?;
        decode(dealer_id, &bytes)
    }

    /// Overwrite the mutable fields. Identity, credentials and `created_at`
    /// are kept; `updated_at` never moves backwards.
    pub fn update_asset(
        &self,
        ctx: &mut dyn TransactionContext,
        dealer_id: &str,
        update: AssetUpdate,
    ) -> Result<(), ContractError> {
        let mut asset = self.read_asset(ctx, dealer_id)?;

        asset.balance = update.balance;
        asset.status = update.status;
        asset.trans_amount = update.trans_amount;
        asset.trans_type = update.trans_type;
        asset.remarks = update.remarks;
        asset.updated_at = asset.updated_at.max(tx_time(ctx));

        let bytes = encode(dealer_id, &asset)?;
        ctx.put_state(dealer_id, bytes)?;
        Ok(())
    }

    pub fn delete_asset(
        &self,
        ctx: &mut dyn TransactionContext,
        dealer_id: &str,
    ) -> Result<(), ContractError> {
        if !self.asset_exists(ctx, dealer_id)? {
            return Err(ContractError::NotFound(dealer_id.to_string()));
        }
        ctx.del_state(dealer_id)?;
        Ok(())
    }

    pub fn asset_exists(
        &self,
        ctx: &mut dyn TransactionContext,
        dealer_id: &str,
    ) -> Result<bool, ContractError> {
        Ok(lookup(ctx, dealer_id)?.is_some())
    }

    /// Every live asset in key order. One undecodable value fails the call.
    pub fn get_all_assets(
        &self,
        ctx: &mut dyn TransactionContext,
    ) -> Result<Vec<Asset>, ContractError> {
        ctx.get_state_by_range("", "")?
            .into_iter()
            .map(|(key, bytes)| decode(&key, &bytes))
            .collect()
    }

    /// Every committed modification, oldest first. Deletions carry no asset.
    pub fn get_asset_history(
        &self,
        ctx: &mut dyn TransactionContext,
        dealer_id: &str,
    ) -> Result<Vec<HistoryEntry>, ContractError> {
        if dealer_id.is_empty() {
            return Ok(Vec::new());
        }
        ctx.get_history_for_key(dealer_id)?
            .into_iter()
            .map(|modification| {
                let asset = if modification.is_delete {
                    None
                } else {
                    Some(decode(dealer_id, &modification.value)?)
                };
                Ok(HistoryEntry {
                    tx_id: modification.tx_id,
                    timestamp: modification.timestamp,
                    is_deleted: modification.is_delete,
                    asset,
                })
            })
            .collect()
    }

    fn insert_new(
        &self,
        ctx: &mut dyn TransactionContext,
        asset: &Asset,
    ) -> Result<(), ContractError> {
        if self.asset_exists(ctx, &asset.dealer_id)? {
            return Err(ContractError::AlreadyExists(asset.dealer_id.clone()));
        }
        let bytes = encode(&asset.dealer_id, asset)?;
        ctx.put_state(&asset.dealer_id, bytes)?;
        Ok(())
    }
}

/// Current value under `dealer_id`. No asset can live under the empty key,
/// so reads of it answer "absent" instead of failing.
fn lookup(
    ctx: &mut dyn TransactionContext,
    dealer_id: &str,
) -> Result<Option<Vec<u8>>, ContractError> {
    if dealer_id.is_empty() {
        return Ok(None);
    }
    Ok(ctx.get_state(dealer_id)?)
}

/// Transaction time at whole-second precision, as stored on assets.
fn tx_time(ctx: &dyn TransactionContext) -> Timestamp {
    ctx.tx_timestamp().trunc_subsecs(0)
}

fn parse_amount(field: &str, raw: &str) -> Result<Amount, ContractError> {
    raw.parse()
        .map_err(|e| ContractError::InvalidArgument(format!("{field}: {e}")))
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(value).map_err(|e| ContractError::decode(key, e))
}

fn decode(key: &str, bytes: &[u8]) -> Result<Asset, ContractError> {
    serde_json::from_slice(bytes).map_err(|e| ContractError::decode(key, e))
}
