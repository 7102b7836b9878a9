use cosmwasm_std::{Decimal, QuerierWrapper, StdError, StdResult, Uint128};

use fair_funding::alchemist::AccountResponse;
use fair_funding::helpers::query_alchemist_account;
use fair_funding::vault::{Config, MintableAmountResponse};

use crate::ContractError;

/// Returns the vault's account at the lending protocol
pub fn query_vault_account(
    querier: QuerierWrapper,
    config: &Config,
    vault: String,
) -> Result<AccountResponse, ContractError> {
    let alchemist = match &config.alchemist {
        Some(alchemist) => alchemist.to_string(),
        None => return Err(ContractError::AlchemistNotSet {}),
    };

    Ok(query_alchemist_account(querier, alchemist, vault, config.yield_token.clone())?)
}

/// Debt the vault can still take on while staying at or below 50% LTV.
/// floor(total_value / 2) - debt - 1, floored at zero.
pub fn max_mintable_amount(account: &AccountResponse) -> Uint128 {
    (account.total_value / Uint128::new(2))
        .saturating_sub(account.debt)
        .saturating_sub(Uint128::one())
}

/// Debt a deposit of `shares` allows on its own, floor(shares / 2) - 1 floored at zero
pub fn mintable_by_shares(shares: Uint128) -> Uint128 {
    (shares / Uint128::new(2)).saturating_sub(Uint128::one())
}

pub fn amount_to_mint(account: &AccountResponse, shares: Uint128) -> Uint128 {
    mintable_by_shares(shares).min(max_mintable_amount(account))
}

pub fn mintable_amounts(account: &AccountResponse, shares: Uint128) -> MintableAmountResponse {
    MintableAmountResponse {
        max_mintable_amount: max_mintable_amount(account),
        mintable_by_shares: mintable_by_shares(shares),
        amount_to_mint: amount_to_mint(account, shares),
    }
}

/// Total value over debt as an 18 decimal fixed point
pub fn latest_collateralisation(account: &AccountResponse) -> Result<Decimal, ContractError> {
    if account.debt.is_zero() {
        return Err(ContractError::ZeroDebt {});
    }

    match Decimal::checked_from_ratio(account.total_value, account.debt) {
        Ok(ratio) => Ok(ratio),
        Err(err) => Err(ContractError::CustomError { val: err.to_string() }),
    }
}

/// Splits the protocol shares backing a position into
/// (shares to liquidate against the debt, shares to withdraw)
pub fn split_position_shares(
    account: &AccountResponse,
    shares_owned: Uint128,
    total_shares: Uint128,
) -> StdResult<(Uint128, Uint128)> {
    let position_shares = account.shares.checked_multiply_ratio(shares_owned, total_shares)
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    if account.debt.is_zero() {
        return Ok((Uint128::zero(), position_shares));
    }
    //Worthless collateral, everything goes to the debt
    if account.total_value.is_zero() {
        return Ok((position_shares, Uint128::zero()));
    }

    //Shares needed to clear this position's part of the debt, p * debt / total_value
    let shares_to_liquidate = position_shares
        .checked_multiply_ratio(account.debt, account.total_value)
        .map_err(|err| StdError::generic_err(err.to_string()))?
        .min(position_shares);

    Ok((shares_to_liquidate, position_shares - shares_to_liquidate))
}
