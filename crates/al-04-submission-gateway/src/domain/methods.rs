//! Contract function registry.
//!
//! Every function the gateway will forward, with the route it takes and the
//! number of string arguments it expects. Names not listed here never reach
//! the ledger.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// How a call reaches the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Single peer, no ordering, no state change.
    Evaluate,
    /// Endorse, order, commit.
    Submit,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKind::Evaluate => write!(f, "evaluate"),
            MethodKind::Submit => write!(f, "submit"),
        }
    }
}

/// Method metadata.
#[derive(Debug, Clone, Copy)]
pub struct MethodInfo {
    /// Function name as installed in the contract.
    pub name: &'static str,
    pub kind: MethodKind,
    /// Exact number of arguments.
    pub arity: usize,
    pub description: &'static str,
}

impl MethodInfo {
    const fn evaluate(name: &'static str, arity: usize, description: &'static str) -> Self {
        Self {
            name,
            kind: MethodKind::Evaluate,
            arity,
            description,
        }
    }

    const fn submit(name: &'static str, arity: usize, description: &'static str) -> Self {
        Self {
            name,
            kind: MethodKind::Submit,
            arity,
            description,
        }
    }

    pub const fn is_submit(&self) -> bool {
        matches!(self.kind, MethodKind::Submit)
    }
}

pub const INIT_LEDGER: &str = "InitLedger";
pub const CREATE_ASSET: &str = "CreateAsset";
pub const READ_ASSET: &str = "ReadAsset";
pub const UPDATE_ASSET: &str = "UpdateAsset";
pub const DELETE_ASSET: &str = "DeleteAsset";
pub const ASSET_EXISTS: &str = "AssetExists";
pub const GET_ALL_ASSETS: &str = "GetAllAssets";
pub const GET_ASSET_HISTORY: &str = "GetAssetHistory";

/// Method registry - all supported functions with metadata
pub static METHOD_REGISTRY: LazyLock<HashMap<&'static str, MethodInfo>> = LazyLock::new(|| {
    let methods = [
        // --- State changing ---
        MethodInfo::submit(INIT_LEDGER, 0, "Seeds the ledger with the initial dealer accounts"),
        MethodInfo::submit(
            CREATE_ASSET,
            7,
            "Creates an asset: dealerID, msisdn, mpin, balance, status, transType, remarks",
        ),
        MethodInfo::submit(
            UPDATE_ASSET,
            6,
            "Updates an asset: dealerID, balance, status, transAmount, transType, remarks",
        ),
        MethodInfo::submit(DELETE_ASSET, 1, "Deletes an asset by dealer id"),
        // --- Queries ---
        MethodInfo::evaluate(READ_ASSET, 1, "Returns the asset stored under a dealer id"),
        MethodInfo::evaluate(ASSET_EXISTS, 1, "Returns whether a live asset exists"),
        MethodInfo::evaluate(GET_ALL_ASSETS, 0, "Returns every live asset in key order"),
        MethodInfo::evaluate(
            GET_ASSET_HISTORY,
            1,
            "Returns every committed change to an asset, oldest first",
        ),
    ];

    methods.into_iter().map(|m| (m.name, m)).collect()
});

/// Look up a function by name.
pub fn get_method_info(name: &str) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.get(name)
}

/// True when `name` is a registered state-changing function.
pub fn is_submit_method(name: &str) -> bool {
    get_method_info(name).is_some_and(MethodInfo::is_submit)
}
