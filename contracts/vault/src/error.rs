use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("only token owner can {action}")]
    NotTokenOwner { action: String },

    #[error("amount was zero, must be positive")]
    ZeroAmount {},

    #[error("position does not exist")]
    NonExistentPosition {},

    #[error("position already liquidated")]
    PositionLiquidated {},

    #[error("can only deposit once per token")]
    AlreadyDeposited {},

    #[error("nothing to claim")]
    NothingToClaim {},

    #[error("cannot mint new Alchemix debt")]
    CannotMintDebt {},

    #[error("zero debt")]
    ZeroDebt {},

    #[error("amount out {received} below min_amount_out {min_amount_out}")]
    InsufficientAmountOut { received: Uint128, min_amount_out: Uint128 },

    #[error("alchemist not set")]
    AlchemistNotSet {},

    #[error("same as current")]
    SameAsCurrent {},

    #[error("cannot override active migration")]
    MigrationActive {},

    #[error("migration not active")]
    MigrationNotActive {},

    #[error("migration already executed")]
    MigrationAlreadyExecuted {},

    #[error("Custom Error val: {val:?}")]
    CustomError { val: String },
}
