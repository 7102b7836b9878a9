use cosmwasm_std::{
    DepsMut, Env, Event, MessageInfo, Response, StdError, StdResult, Storage, SubMsg, Uint128, coins,
};

use fair_funding::alchemist::ExecuteMsg as Alchemist_ExecuteMsg;
use fair_funding::helpers::{assert_sent_exact_native_amount, native_send_msg, query_token_owner};
use fair_funding::types::Position;
use fair_funding::vault::{CLAIMABLE_SCALE, DEPOSIT_MIN_AMOUNT_OUT, LIQUIDATE_MIN_AMOUNT_OUT};

use crate::collateral::{query_vault_account, split_position_shares};
use crate::contract::{assert_depositor, assert_operator};
use crate::helpers::alchemist_msg;
use crate::state::{
    ClaimablePropagation, DepositPropagation, LiquidationPropagation, CLAIMABLE, CONFIG, DEPOSIT, LIQUIDATION,
    POOL, POSITIONS,
};
use crate::ContractError;

//Reply IDs
pub const DEPOSIT_REPLY_ID: u64 = 1u64;
pub const CLAIMABLE_REPLY_ID: u64 = 2u64;
pub const LIQUIDATION_REPLY_ID: u64 = 3u64;

/// Registers the sale proceeds of `token_id` as a new position,
/// deposits them into the lending protocol & mints debt against them in the reply
pub fn register_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    //Operators & depositors only
    if assert_operator(deps.storage, &info.sender).is_err() {
        assert_depositor(deps.storage, &info.sender)?;
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    assert_sent_exact_native_amount(&info, &config.payment_denom, amount)?;

    //Token has to exist
    if query_token_owner(deps.querier, config.nft_contract.to_string(), token_id).is_err() {
        return Err(ContractError::CustomError {
            val: format!("token {} does not exist", token_id),
        });
    }

    if let Some(position) = POSITIONS.may_load(deps.storage, token_id)? {
        if position.is_liquidated {
            return Err(ContractError::PositionLiquidated {});
        }
        if !position.amount_deposited.is_zero() {
            return Err(ContractError::AlreadyDeposited {});
        }
    }

    let position = Position::new(token_id, amount);
    POSITIONS.save(deps.storage, token_id, &position)?;

    let mut pool = POOL.load(deps.storage)?;
    pool.total_shares += amount;
    POOL.save(deps.storage, &pool)?;

    //Deposit into the lending protocol, minting waits for the reply
    let deposit_msg = alchemist_msg(
        &config,
        Alchemist_ExecuteMsg::DepositUnderlying {
            yield_token: config.yield_token.clone(),
            amount,
            recipient: env.contract.address.to_string(),
            min_amount_out: Uint128::new(DEPOSIT_MIN_AMOUNT_OUT),
        },
        coins(amount.u128(), config.payment_denom.clone()),
    )?;
    DEPOSIT.save(deps.storage, &DepositPropagation { token_id, shares: amount })?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(deposit_msg, DEPOSIT_REPLY_ID))
        .add_attribute("method", "register_deposit")
        .add_attribute("total_shares", pool.total_shares)
        .add_event(
            Event::new("deposit")
                .add_attribute("depositor", info.sender)
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("amount", amount),
        ))
}

/// Withdraws `shares` from the lending protocol to the vault.
/// What the vault receives is distributed as yield in the reply.
pub fn withdraw_underlying_to_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    shares: Uint128,
    min_amount_out: Uint128,
) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;

    let pre_balance = deps
        .querier
        .query_balance(env.contract.address.clone(), config.payment_denom.clone())?
        .amount;
    CLAIMABLE.save(deps.storage, &ClaimablePropagation { pre_balance, min_amount_out })?;

    let withdraw_msg = alchemist_msg(
        &config,
        Alchemist_ExecuteMsg::WithdrawUnderlying {
            yield_token: config.yield_token.clone(),
            shares,
            recipient: env.contract.address.to_string(),
            min_amount_out,
        },
        vec![],
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(withdraw_msg, CLAIMABLE_REPLY_ID))
        .add_attribute("method", "withdraw_underlying_to_claim")
        .add_attribute("shares", shares)
        .add_attribute("min_amount_out", min_amount_out))
}

/// Pays the outstanding yield of `token_id` to its current NFT owner
pub fn claim(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_token_owner(&deps, &config.nft_contract.to_string(), &info, token_id, "claim")?;

    let mut position = match POSITIONS.may_load(deps.storage, token_id)? {
        Some(position) if !position.is_liquidated => position,
        _ => return Err(ContractError::NothingToClaim {}),
    };

    let amount = claimable_for_token(deps.storage, token_id)?;
    if amount.is_zero() {
        return Err(ContractError::NothingToClaim {});
    }

    position.amount_claimed += amount;
    POSITIONS.save(deps.storage, token_id, &position)?;

    Ok(Response::new()
        .add_message(native_send_msg(info.sender.to_string(), config.payment_denom, amount))
        .add_attribute("method", "claim")
        .add_event(claimed_event(token_id, info.sender.to_string(), amount)))
}

/// Exits the position of `token_id`.
/// Outstanding yield is paid out, the position's part of the debt is repaid with its own collateral
/// & the rest is withdrawn to the owner.
pub fn liquidate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    min_amount_out: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_token_owner(&deps, &config.nft_contract.to_string(), &info, token_id, "liquidate")?;

    let mut position = match POSITIONS.may_load(deps.storage, token_id)? {
        Some(position) => position,
        None => return Err(ContractError::NonExistentPosition {}),
    };
    if position.is_liquidated {
        return Err(ContractError::PositionLiquidated {});
    }
    if position.amount_deposited.is_zero() {
        return Err(ContractError::NonExistentPosition {});
    }

    let mut res = Response::new()
        .add_attribute("method", "liquidate")
        .add_attribute("token_id", token_id.to_string());

    //Settle outstanding yield first
    let claimable = claimable_for_token(deps.storage, token_id)?;
    let mut claim_msg = None;
    if !claimable.is_zero() {
        position.amount_claimed += claimable;
        claim_msg = Some(native_send_msg(info.sender.to_string(), config.payment_denom.clone(), claimable));
        res = res.add_event(claimed_event(token_id, info.sender.to_string(), claimable));
    }

    let account = query_vault_account(deps.querier, &config, env.contract.address.to_string())?;
    let mut pool = POOL.load(deps.storage)?;
    let (shares_to_liquidate, shares_to_withdraw) =
        split_position_shares(&account, position.shares_owned, pool.total_shares)?;

    //Close the position
    pool.total_shares = pool.total_shares.checked_sub(position.shares_owned)?;
    position.shares_owned = Uint128::zero();
    position.is_liquidated = true;
    POSITIONS.save(deps.storage, token_id, &position)?;
    POOL.save(deps.storage, &pool)?;

    //Repay this position's part of the debt
    if !shares_to_liquidate.is_zero() {
        res = res.add_message(alchemist_msg(
            &config,
            Alchemist_ExecuteMsg::Liquidate {
                yield_token: config.yield_token.clone(),
                shares: shares_to_liquidate,
                min_amount_out: Uint128::new(LIQUIDATE_MIN_AMOUNT_OUT),
            },
            vec![],
        )?);
    }

    //Withdraw the rest, the reply forwards what the vault received
    if !shares_to_withdraw.is_zero() {
        let pre_balance = deps
            .querier
            .query_balance(env.contract.address.clone(), config.payment_denom.clone())?
            .amount;
        LIQUIDATION.save(deps.storage, &LiquidationPropagation {
            token_id,
            owner: info.sender.clone(),
            pre_balance,
            min_amount_out,
        })?;

        let withdraw_msg = alchemist_msg(
            &config,
            Alchemist_ExecuteMsg::WithdrawUnderlying {
                yield_token: config.yield_token.clone(),
                shares: shares_to_withdraw,
                recipient: env.contract.address.to_string(),
                min_amount_out,
            },
            vec![],
        )?;
        res = res.add_submessage(SubMsg::reply_on_success(withdraw_msg, LIQUIDATION_REPLY_ID));
    } else {
        if !min_amount_out.is_zero() {
            return Err(ContractError::InsufficientAmountOut {
                received: Uint128::zero(),
                min_amount_out,
            });
        }
        res = res.add_event(liquidated_event(token_id, info.sender.to_string(), Uint128::zero()));
    }

    if let Some(msg) = claim_msg {
        res = res.add_message(msg);
    }

    Ok(res
        .add_attribute("shares_liquidated", shares_to_liquidate)
        .add_attribute("shares_withdrawn", shares_to_withdraw))
}

/// Adds `amount` of yield to the reward-per-share accumulator
pub fn mark_as_claimable(storage: &mut dyn Storage, amount: Uint128) -> StdResult<Uint128> {
    let mut pool = POOL.load(storage)?;
    if pool.total_shares.is_zero() {
        return Err(StdError::generic_err("no shares to distribute to"));
    }

    let increase = amount
        .checked_multiply_ratio(CLAIMABLE_SCALE, pool.total_shares)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    pool.amount_claimable_per_share += increase;
    POOL.save(storage, &pool)?;

    Ok(pool.amount_claimable_per_share)
}

/// Yield `token_id` can still claim, zero for unknown & liquidated positions
pub fn claimable_for_token(storage: &dyn Storage, token_id: u64) -> StdResult<Uint128> {
    let position = match POSITIONS.may_load(storage, token_id)? {
        Some(position) => position,
        None => return Ok(Uint128::zero()),
    };
    if position.is_liquidated {
        return Ok(Uint128::zero());
    }
    let pool = POOL.load(storage)?;

    let total_claimable = position
        .shares_owned
        .checked_multiply_ratio(pool.amount_claimable_per_share, CLAIMABLE_SCALE)
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    Ok(total_claimable.saturating_sub(position.amount_claimed))
}

fn assert_token_owner(
    deps: &DepsMut,
    nft_contract: &str,
    info: &MessageInfo,
    token_id: u64,
    action: &str,
) -> Result<(), ContractError> {
    match query_token_owner(deps.querier, nft_contract.to_string(), token_id) {
        Ok(owner) if owner == info.sender => Ok(()),
        _ => Err(ContractError::NotTokenOwner { action: action.to_string() }),
    }
}

pub fn claimed_event(token_id: u64, owner: String, amount: Uint128) -> Event {
    Event::new("claimed")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("owner", owner)
        .add_attribute("amount", amount)
}

pub fn liquidated_event(token_id: u64, owner: String, amount_out: Uint128) -> Event {
    Event::new("liquidated")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("owner", owner)
        .add_attribute("amount_out", amount_out)
}
