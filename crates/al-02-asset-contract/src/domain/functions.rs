//! Names and arities of the contract's callable functions.

use std::fmt;
use std::str::FromStr;

/// A callable contract function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractFunction {
    InitLedger,
    CreateAsset,
    ReadAsset,
    UpdateAsset,
    DeleteAsset,
    AssetExists,
    GetAllAssets,
    GetAssetHistory,
}

impl ContractFunction {
    pub const ALL: [ContractFunction; 8] = [
        ContractFunction::InitLedger,
        ContractFunction::CreateAsset,
        ContractFunction::ReadAsset,
        ContractFunction::UpdateAsset,
        ContractFunction::DeleteAsset,
        ContractFunction::AssetExists,
        ContractFunction::GetAllAssets,
        ContractFunction::GetAssetHistory,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ContractFunction::InitLedger => "InitLedger",
            ContractFunction::CreateAsset => "CreateAsset",
            ContractFunction::ReadAsset => "ReadAsset",
            ContractFunction::UpdateAsset => "UpdateAsset",
            ContractFunction::DeleteAsset => "DeleteAsset",
            ContractFunction::AssetExists => "AssetExists",
            ContractFunction::GetAllAssets => "GetAllAssets",
            ContractFunction::GetAssetHistory => "GetAssetHistory",
        }
    }

    /// Number of string arguments expected.
    pub const fn arity(self) -> usize {
        match self {
            ContractFunction::InitLedger | ContractFunction::GetAllAssets => 0,
            ContractFunction::ReadAsset
            | ContractFunction::DeleteAsset
            | ContractFunction::AssetExists
            | ContractFunction::GetAssetHistory => 1,
            ContractFunction::UpdateAsset => 6,
            ContractFunction::CreateAsset => 7,
        }
    }

    /// True when the function never writes.
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            ContractFunction::ReadAsset
                | ContractFunction::AssetExists
                | ContractFunction::GetAllAssets
                | ContractFunction::GetAssetHistory
        )
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown function {s:?}"))
    }
}
