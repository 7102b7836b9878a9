use cosmwasm_std::{DepsMut, Env, Event, Reply, Response, StdError, StdResult, SubMsg};

use fair_funding::alchemist::ExecuteMsg as Alchemist_ExecuteMsg;
use fair_funding::helpers::native_send_msg;

use crate::collateral::{amount_to_mint, query_vault_account};
use crate::helpers::alchemist_msg;
use crate::positions::{liquidated_event, mark_as_claimable};
use crate::state::{CLAIMABLE, CONFIG, DEPOSIT, LIQUIDATION};
use crate::ContractError;

//On success....
//Mint debt against the deposit now that the lending protocol's books reflect it
pub fn handle_deposit_reply(deps: DepsMut, env: Env, msg: Reply) -> StdResult<Response> {
    match msg.result.into_result() {
        Ok(_result) => {
            let config = CONFIG.load(deps.storage)?;
            let deposit = DEPOSIT.load(deps.storage)?;
            DEPOSIT.remove(deps.storage);

            let account = query_vault_account(deps.querier, &config, env.contract.address.to_string())
                .map_err(|err| StdError::GenericErr { msg: err.to_string() })?;

            let amount = amount_to_mint(&account, deposit.shares);
            if amount.is_zero() {
                return Err(StdError::GenericErr { msg: ContractError::CannotMintDebt {}.to_string() });
            }

            let mint_msg = alchemist_msg(
                &config,
                Alchemist_ExecuteMsg::Mint {
                    amount,
                    recipient: config.fund_receiver.to_string(),
                },
                vec![],
            )
            .map_err(|err| StdError::GenericErr { msg: err.to_string() })?;

            Ok(Response::new()
                .add_submessage(SubMsg::new(mint_msg))
                .add_attribute("token_id", deposit.token_id.to_string())
                .add_event(
                    Event::new("funded")
                        .add_attribute("recipient", config.fund_receiver)
                        .add_attribute("amount", amount),
                ))
        }
        Err(err) => Err(StdError::GenericErr { msg: err }), //We only reply on success
    }
}

//On success....
//Distribute what the vault received as yield
pub fn handle_claimable_reply(deps: DepsMut, env: Env, msg: Reply) -> StdResult<Response> {
    match msg.result.into_result() {
        Ok(_result) => {
            let config = CONFIG.load(deps.storage)?;
            let claimable = CLAIMABLE.load(deps.storage)?;
            CLAIMABLE.remove(deps.storage);

            let balance = deps
                .querier
                .query_balance(env.contract.address, config.payment_denom)?
                .amount;
            let amount = balance.saturating_sub(claimable.pre_balance);

            let amount_claimable_per_share = mark_as_claimable(deps.storage, amount)?;

            Ok(Response::new()
                .add_attribute("amount_claimable_per_share", amount_claimable_per_share)
                .add_event(
                    Event::new("claimable")
                        .add_attribute("amount", amount)
                        .add_attribute("min_amount_out", claimable.min_amount_out),
                ))
        }
        Err(err) => Err(StdError::GenericErr { msg: err }), //We only reply on success
    }
}

//On success....
//Forward what the vault received to the position's owner
pub fn handle_liquidation_reply(deps: DepsMut, env: Env, msg: Reply) -> StdResult<Response> {
    match msg.result.into_result() {
        Ok(_result) => {
            let config = CONFIG.load(deps.storage)?;
            let liquidation = LIQUIDATION.load(deps.storage)?;
            LIQUIDATION.remove(deps.storage);

            let balance = deps
                .querier
                .query_balance(env.contract.address, config.payment_denom.clone())?
                .amount;
            let amount_out = balance.saturating_sub(liquidation.pre_balance);

            if amount_out < liquidation.min_amount_out {
                return Err(StdError::GenericErr {
                    msg: ContractError::InsufficientAmountOut {
                        received: amount_out,
                        min_amount_out: liquidation.min_amount_out,
                    }
                    .to_string(),
                });
            }

            let mut res = Response::new().add_event(liquidated_event(
                liquidation.token_id,
                liquidation.owner.to_string(),
                amount_out,
            ));
            if !amount_out.is_zero() {
                res = res.add_message(native_send_msg(
                    liquidation.owner.to_string(),
                    config.payment_denom,
                    amount_out,
                ));
            }

            Ok(res)
        }
        Err(err) => Err(StdError::GenericErr { msg: err }), //We only reply on success
    }
}
