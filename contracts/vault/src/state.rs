use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use fair_funding::types::{Migration, Pool, Position};
use fair_funding::vault::Config;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct DepositPropagation {
    pub token_id: u64,
    /// Shares the deposit created, caps the debt it may mint
    pub shares: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ClaimablePropagation {
    /// Vault balance of the payment denom before the withdrawal
    pub pre_balance: Uint128,
    pub min_amount_out: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct LiquidationPropagation {
    pub token_id: u64,
    pub owner: Addr,
    /// Vault balance of the payment denom before the withdrawal
    pub pre_balance: Uint128,
    pub min_amount_out: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const POOL: Item<Pool> = Item::new("pool");
pub const POSITIONS: Map<u64, Position> = Map::new("positions"); //token_id, position
pub const OPERATORS: Map<Addr, bool> = Map::new("operators");
pub const DEPOSITORS: Map<Addr, bool> = Map::new("depositors");
pub const MIGRATION: Item<Migration> = Item::new("migration");

/// Config ownership transfer
pub const OWNERSHIP_TRANSFER: Item<Addr> = Item::new("ownership_transfer");
/// Migration admin transfer
pub const MIGRATION_ADMIN_TRANSFER: Item<Addr> = Item::new("migration_admin_transfer");

//Reply State Propagations
pub const DEPOSIT: Item<DepositPropagation> = Item::new("deposit_propagation");
pub const CLAIMABLE: Item<ClaimablePropagation> = Item::new("claimable_propagation");
pub const LIQUIDATION: Item<LiquidationPropagation> = Item::new("liquidation_propagation");
