use core::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint128};

//Vault

/// Ledger entry for a single NFT.
/// Created on the token's first deposit and never deleted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Position {
    pub token_id: u64,
    /// Principal registered at deposit time, immutable afterwards
    pub amount_deposited: Uint128,
    /// Yield already paid out to the token's owners
    pub amount_claimed: Uint128,
    /// Shares in the pool, zeroed on liquidation
    pub shares_owned: Uint128,
    pub is_liquidated: bool,
}

impl Position {
    pub fn new(token_id: u64, amount: Uint128) -> Self {
        Position {
            token_id,
            amount_deposited: amount,
            amount_claimed: Uint128::zero(),
            shares_owned: amount,
            is_liquidated: false,
        }
    }

    /// Placeholder returned for tokens that were never deposited
    pub fn empty(token_id: u64) -> Self {
        Position::new(token_id, Uint128::zero())
    }
}

/// Pool-wide share ledger
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct Pool {
    /// Sum of shares over all non-liquidated positions
    pub total_shares: Uint128,
    /// Reward-per-share accumulator, scaled by CLAIMABLE_SCALE
    pub amount_claimable_per_share: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct Migration {
    /// Successor contract, None while no migration is staged
    pub migrator: Option<Addr>,
    /// Timestamp (seconds) after which the migration is executable, None while inactive
    pub migration_active: Option<u64>,
    pub migration_executed: bool,
}

impl Migration {
    pub fn is_active(&self) -> bool {
        self.migration_active.is_some()
    }
}

//Auction House

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// No epoch has been opened yet
    Unstarted,
    /// An epoch is open or waiting to be settled
    Running,
    /// Every token up to max_token_id has been settled
    Concluded,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuctionStatus::Unstarted => write!(f, "unstarted"),
            AuctionStatus::Running => write!(f, "running"),
            AuctionStatus::Concluded => write!(f, "concluded"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Epoch {
    pub current_epoch_token_id: u64,
    /// Last token id that will be auctioned (inclusive)
    pub max_token_id: u64,
    pub epoch_start: u64,
    pub epoch_end: u64,
    pub highest_bid: Uint128,
    pub highest_bidder: Option<Addr>,
    pub status: AuctionStatus,
}

impl Epoch {
    pub fn is_in_progress(&self, now: u64) -> bool {
        self.status == AuctionStatus::Running && self.epoch_start <= now && now <= self.epoch_end
    }

    pub fn clear_bid(&mut self) {
        self.highest_bid = Uint128::zero();
        self.highest_bidder = None;
    }
}
