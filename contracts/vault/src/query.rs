use cosmwasm_std::{Decimal, Deps, Env, StdError, StdResult, Uint128};

use fair_funding::alchemist::AccountResponse;
use fair_funding::types::Position;
use fair_funding::vault::{MintableAmountResponse, OwnershipTransfersResponse};

use crate::collateral::{latest_collateralisation, mintable_amounts, query_vault_account};
use crate::positions::claimable_for_token;
use crate::state::{CONFIG, MIGRATION_ADMIN_TRANSFER, OWNERSHIP_TRANSFER, POSITIONS};

/// Returns the position of `token_id`, an empty one if it was never deposited
pub fn query_position(deps: Deps, token_id: u64) -> StdResult<Position> {
    Ok(POSITIONS
        .may_load(deps.storage, token_id)?
        .unwrap_or_else(|| Position::empty(token_id)))
}

pub fn query_claimable_for_token(deps: Deps, token_id: u64) -> StdResult<Uint128> {
    claimable_for_token(deps.storage, token_id)
}

fn vault_account(deps: Deps, env: Env) -> StdResult<AccountResponse> {
    let config = CONFIG.load(deps.storage)?;

    query_vault_account(deps.querier, &config, env.contract.address.to_string())
        .map_err(|err| StdError::GenericErr { msg: err.to_string() })
}

pub fn query_latest_collateralisation(deps: Deps, env: Env) -> StdResult<Decimal> {
    let account = vault_account(deps, env)?;

    latest_collateralisation(&account).map_err(|err| StdError::GenericErr { msg: err.to_string() })
}

pub fn query_mintable_amount(deps: Deps, env: Env, shares: Uint128) -> StdResult<MintableAmountResponse> {
    let account = vault_account(deps, env)?;

    Ok(mintable_amounts(&account, shares))
}

pub fn query_ownership_transfers(deps: Deps) -> StdResult<OwnershipTransfersResponse> {
    let config = CONFIG.load(deps.storage)?;

    Ok(OwnershipTransfersResponse {
        owner: config.owner,
        suggested_owner: OWNERSHIP_TRANSFER.may_load(deps.storage)?,
        migration_admin: config.migration_admin,
        suggested_migration_admin: MIGRATION_ADMIN_TRANSFER.may_load(deps.storage)?,
    })
}
