use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Scale of the reward-per-share accumulator
pub const CLAIMABLE_SCALE: u128 = 1_000_000u128;
/// Delay between activating a migration and being able to execute it
pub const MIGRATION_TIMELOCK: u64 = 30 * 86_400u64;
/// min_amount_out handed to the lending protocol on deposits
pub const DEPOSIT_MIN_AMOUNT_OUT: u128 = 1u128;
/// min_amount_out handed to the lending protocol on liquidations
pub const LIQUIDATE_MIN_AMOUNT_OUT: u128 = 1u128;

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner & first operator, defaults to the instantiator
    pub owner: Option<String>,
    /// Defaults to the instantiator
    pub migration_admin: Option<String>,
    /// NFT registry whose holders own the positions
    pub nft_contract: String,
    /// Native denom deposits are paid in
    pub payment_denom: String,
    /// Yield token used for the lending protocol deposits
    pub yield_token: String,
    /// Lending protocol, deposits fail until it's set
    pub alchemist: Option<String>,
    /// Receives the minted debt, defaults to the owner
    pub fund_receiver: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register the sale proceeds of `token_id`.
    /// Operator or depositor only, `amount` of the payment denom has to be sent along.
    RegisterDeposit {
        token_id: u64,
        amount: Uint128,
    },
    /// Withdraw `shares` from the lending protocol & distribute the proceeds as yield.
    /// Operator only.
    WithdrawUnderlyingToClaim {
        shares: Uint128,
        min_amount_out: Uint128,
    },
    /// Pay out the yield of `token_id` to its owner
    Claim {
        token_id: u64,
    },
    /// Exit the position of `token_id`: repay its share of the debt
    /// & send the remaining collateral to its owner
    Liquidate {
        token_id: u64,
        min_amount_out: Uint128,
    },
    SetAlchemist {
        alchemist: String,
    },
    SetFundReceiver {
        fund_receiver: String,
    },
    AddOperator {
        operator: String,
    },
    RemoveOperator {
        operator: String,
    },
    AddDepositor {
        depositor: String,
    },
    RemoveDepositor {
        depositor: String,
    },
    /// Start an ownership transfer
    SuggestOwner {
        owner: String,
    },
    /// Complete an ownership transfer, callable by the suggested owner
    AcceptOwner {},
    SuggestMigrationAdmin {
        admin: String,
    },
    AcceptMigrationAdmin {},
    /// Stage a migration to `migrator`, executable after MIGRATION_TIMELOCK
    ActivateMigration {
        migrator: String,
    },
    DeactivateMigration {},
    /// Hand the vault's liquid balance to the migrator.
    /// Operator only, once the timelock passed.
    ExecuteMigration {},
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns Config
    Config {},
    /// Returns Position, an empty one for unknown tokens
    Position { token_id: u64 },
    /// Returns Uint128
    ClaimableForToken { token_id: u64 },
    /// Returns Pool
    Pool {},
    /// Returns bool
    IsOperator { address: String },
    /// Returns bool
    IsDepositor { address: String },
    /// Returns Migration
    Migration {},
    /// Returns Decimal, total value over debt
    LatestCollateralisation {},
    /// Returns MintableAmountResponse
    MintableAmount { shares: Uint128 },
    /// Returns OwnershipTransfersResponse
    OwnershipTransfers {},
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub migration_admin: Addr,
    pub nft_contract: Addr,
    pub payment_denom: String,
    pub yield_token: String,
    pub alchemist: Option<Addr>,
    pub fund_receiver: Addr,
}

#[cw_serde]
pub struct MintableAmountResponse {
    /// Debt the vault can still take on at 50% LTV
    pub max_mintable_amount: Uint128,
    /// Debt a deposit of `shares` would allow on its own
    pub mintable_by_shares: Uint128,
    /// Lesser of the two
    pub amount_to_mint: Uint128,
}

#[cw_serde]
pub struct OwnershipTransfersResponse {
    pub owner: Addr,
    pub suggested_owner: Option<Addr>,
    pub migration_admin: Addr,
    pub suggested_migration_admin: Option<Addr>,
}
