use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Length of a single auction epoch in seconds
pub const EPOCH_LENGTH: u64 = 86_400u64;
/// Bids landing closer than this to the epoch end push the end out to now + TIME_BUFFER
pub const TIME_BUFFER: u64 = 15 * 60;
/// A new bid has to beat the highest bid by more than this percentage
pub const MIN_INCREMENT_PCT: u128 = 2u128;

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the owner, defaults to the instantiator
    pub owner: Option<String>,
    /// Native denom bids are paid in
    pub payment_denom: String,
    /// Address of the NFT registry, the house must be its minter
    pub nft_contract: String,
    /// Address of the vault that receives the winning bids
    pub vault_contract: String,
    /// First token id up for auction
    pub start_token_id: u64,
    /// Last token id up for auction (inclusive)
    pub max_token_id: u64,
    /// Minimum acceptable bid
    pub reserve_price: Uint128,
    /// Receives tokens that got no bid
    pub fallback_receiver: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open the first epoch.
    /// Owner only, None starts now.
    StartAuction {
        start_time: Option<u64>,
    },
    /// Bid on the token of the current epoch.
    /// `amount` of the payment denom has to be sent along.
    Bid {
        token_id: u64,
        amount: Uint128,
    },
    /// Close the ended epoch: mint the token to the winner (or fallback receiver),
    /// forward the winning bid to the vault & open the next epoch.
    Settle {},
    /// Return the highest bid of an ended epoch without settling it.
    /// Owner only.
    RefundHighestBidder {},
    /// Start an ownership transfer
    SuggestOwner {
        owner: String,
    },
    /// Complete an ownership transfer, callable by the suggested owner
    AcceptOwnership {},
    /// Update the vault that receives the winning bids
    SetVault {
        vault: String,
    },
    /// Update the last token id up for auction
    SetMaxTokenId {
        max_token_id: u64,
    },
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns Config
    Config {},
    /// Returns the current Epoch
    AuctionState {},
    /// Returns the pending owner, if any
    OwnershipTransfer {},
}

#[cw_serde]
pub struct Config {
    /// Address of the owner
    pub owner: Addr,
    /// Native denom bids are paid in
    pub payment_denom: String,
    /// Address of the NFT registry
    pub nft_contract: Addr,
    /// Address of the vault
    pub vault: Addr,
    /// Minimum acceptable bid
    pub reserve_price: Uint128,
    /// Receives tokens that got no bid
    pub fallback_receiver: Addr,
}

#[cw_serde]
pub struct OwnershipTransferResponse {
    pub owner: Addr,
    pub suggested_owner: Option<Addr>,
}
