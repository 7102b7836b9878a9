use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("auction already started")]
    AuctionAlreadyStarted {},

    #[error("cannot start in the past")]
    StartInPast {},

    #[error("start time out of range")]
    StartOutOfRange {},

    #[error("auction not in progress")]
    AuctionNotInProgress {},

    #[error("token id not up for auction")]
    InvalidTokenId {},

    #[error("reserve price not met")]
    ReservePriceNotMet {},

    #[error("bid not high enough")]
    BidTooLow {},

    #[error("epoch not over")]
    EpochNotOver {},

    #[error("no bid to refund")]
    NoBidToRefund {},

    #[error("same as current")]
    SameAsCurrent {},

    #[error("cannot set max < current")]
    InvalidMaxTokenId {},

    #[error("Custom Error val: {val:?}")]
    CustomError { val: String },
}
