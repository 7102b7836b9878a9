use cosmwasm_std::{
    coins, to_json_binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, Uint128, WasmMsg,
};

use fair_funding::auction_house::{EPOCH_LENGTH, MIN_INCREMENT_PCT, TIME_BUFFER};
use fair_funding::helpers::{assert_sent_exact_native_amount, native_send_msg};
use fair_funding::nft::ExecuteMsg as NFT_ExecuteMsg;
use fair_funding::types::{AuctionStatus, Epoch};
use fair_funding::vault::ExecuteMsg as Vault_ExecuteMsg;

use crate::error::ContractError;
use crate::state::{CONFIG, EPOCH};

////EPOCH FLOW////
// Unstarted -> Running(token) -> ended, waiting for settlement -> Running(token + 1) -> ... -> Concluded
// - Epoch transitions are lazy, they only happen on settle.
// - max_token_id is the last token sold.

/// Opens the first epoch at `start_time`, now if None or 0
pub fn start_auction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    start_time: Option<u64>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let mut epoch = EPOCH.load(deps.storage)?;
    if epoch.status != AuctionStatus::Unstarted {
        return Err(ContractError::AuctionAlreadyStarted {});
    }

    let now = env.block.time.seconds();
    let start = match start_time {
        Some(0) | None => now,
        Some(start) => start,
    };
    if start < now {
        return Err(ContractError::StartInPast {});
    }

    epoch.epoch_end = start
        .checked_add(EPOCH_LENGTH)
        .ok_or(ContractError::StartOutOfRange {})?;
    epoch.epoch_start = start;
    epoch.status = AuctionStatus::Running;
    EPOCH.save(deps.storage, &epoch)?;

    Ok(Response::new()
        .add_attribute("method", "start_auction")
        .add_attribute("token_id", epoch.current_epoch_token_id.to_string())
        .add_attribute("epoch_end", epoch.epoch_end.to_string())
        .add_event(
            Event::new("auction_start")
                .add_attribute("timestamp", start.to_string())
                .add_attribute("owner", info.sender),
        ))
}

/// Minimum a new bid has to exceed, zero if there is no bid yet
pub fn min_next_bid(epoch: &Epoch) -> Uint128 {
    if epoch.highest_bidder.is_none() {
        return Uint128::zero();
    }
    epoch.highest_bid.multiply_ratio(100 + MIN_INCREMENT_PCT, 100u128)
}

pub fn bid(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut epoch = EPOCH.load(deps.storage)?;
    let now = env.block.time.seconds();

    if !epoch.is_in_progress(now) {
        return Err(ContractError::AuctionNotInProgress {});
    }
    if token_id != epoch.current_epoch_token_id {
        return Err(ContractError::InvalidTokenId {});
    }
    if amount < config.reserve_price {
        return Err(ContractError::ReservePriceNotMet {});
    }
    //Ties go to the house
    if epoch.highest_bidder.is_some() && amount <= min_next_bid(&epoch) {
        return Err(ContractError::BidTooLow {});
    }
    assert_sent_exact_native_amount(&info, &config.payment_denom, amount)?;

    let mut res = Response::new()
        .add_attribute("method", "bid")
        .add_attribute("token_id", token_id.to_string());

    //Refund the outbid bidder in full
    if let Some(previous_bidder) = epoch.highest_bidder.take() {
        res = res
            .add_message(native_send_msg(
                previous_bidder.to_string(),
                config.payment_denom.clone(),
                epoch.highest_bid,
            ))
            .add_event(
                Event::new("bid_refunded")
                    .add_attribute("bidder", previous_bidder)
                    .add_attribute("amount", epoch.highest_bid),
            );
    }
    epoch.highest_bid = amount;
    epoch.highest_bidder = Some(info.sender.clone());

    //Anti-sniping
    if epoch.epoch_end - now < TIME_BUFFER {
        epoch.epoch_end = now + TIME_BUFFER;
        res = res.add_event(
            Event::new("auction_extended")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("epoch_end", epoch.epoch_end.to_string()),
        );
    }
    EPOCH.save(deps.storage, &epoch)?;

    Ok(res.add_event(
        Event::new("bid")
            .add_attribute("bidder", info.sender)
            .add_attribute("token_id", token_id.to_string())
            .add_attribute("amount", amount),
    ))
}

/// Closes the ended epoch & opens the next one.
/// The token goes to the highest bidder & the bid to the vault, or the token to the fallback receiver.
pub fn settle(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut epoch = EPOCH.load(deps.storage)?;
    let now = env.block.time.seconds();

    if epoch.status != AuctionStatus::Running {
        return Err(ContractError::AuctionNotInProgress {});
    }
    if now <= epoch.epoch_end {
        return Err(ContractError::EpochNotOver {});
    }

    let token_id = epoch.current_epoch_token_id;
    let mut msgs: Vec<CosmosMsg> = vec![];
    let event;
    match epoch.highest_bidder.clone() {
        Some(winner) => {
            //Mint to the winner first, the vault checks the token exists
            msgs.push(nft_mint_msg(&config.nft_contract.to_string(), token_id, winner.to_string())?);
            msgs.push(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: config.vault.to_string(),
                msg: to_json_binary(&Vault_ExecuteMsg::RegisterDeposit {
                    token_id,
                    amount: epoch.highest_bid,
                })?,
                funds: coins(epoch.highest_bid.u128(), config.payment_denom.clone()),
            }));
            event = Event::new("auction_settled")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("winner", winner)
                .add_attribute("amount", epoch.highest_bid);
        }
        None => {
            msgs.push(nft_mint_msg(
                &config.nft_contract.to_string(),
                token_id,
                config.fallback_receiver.to_string(),
            )?);
            event = Event::new("auction_settled_with_no_bid")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("fallback_receiver", config.fallback_receiver.clone());
        }
    }
    epoch.clear_bid();

    //Next epoch or end of the series
    if epoch.current_epoch_token_id < epoch.max_token_id {
        epoch.current_epoch_token_id += 1;
        epoch.epoch_start = now;
        epoch.epoch_end = now + EPOCH_LENGTH;
    } else {
        epoch.epoch_start = 0;
        epoch.epoch_end = 0;
        epoch.status = AuctionStatus::Concluded;
    }
    EPOCH.save(deps.storage, &epoch)?;

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("method", "settle")
        .add_attribute("settled_token_id", token_id.to_string())
        .add_attribute("status", epoch.status.to_string())
        .add_event(event))
}

/// Returns the highest bid of an ended epoch without settling it
pub fn refund_highest_bidder(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let mut epoch = EPOCH.load(deps.storage)?;
    if epoch.status != AuctionStatus::Running {
        return Err(ContractError::AuctionNotInProgress {});
    }
    if env.block.time.seconds() <= epoch.epoch_end {
        return Err(ContractError::EpochNotOver {});
    }
    let bidder = match epoch.highest_bidder.clone() {
        Some(bidder) => bidder,
        None => return Err(ContractError::NoBidToRefund {}),
    };
    let amount = epoch.highest_bid;
    epoch.clear_bid();
    EPOCH.save(deps.storage, &epoch)?;

    Ok(Response::new()
        .add_message(native_send_msg(bidder.to_string(), config.payment_denom, amount))
        .add_attribute("method", "refund_highest_bidder")
        .add_event(
            Event::new("bid_refunded")
                .add_attribute("bidder", bidder)
                .add_attribute("amount", amount),
        ))
}

fn nft_mint_msg(nft_contract: &str, token_id: u64, owner: String) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: nft_contract.to_string(),
        msg: to_json_binary(&NFT_ExecuteMsg::Mint { token_id, owner })?,
        funds: vec![],
    }))
}
