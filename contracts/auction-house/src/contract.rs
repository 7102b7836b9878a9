#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use fair_funding::auction_house::{
    Config, ExecuteMsg, InstantiateMsg, OwnershipTransferResponse, QueryMsg,
};
use fair_funding::types::{AuctionStatus, Epoch};

use crate::auction::{bid, refund_highest_bidder, settle, start_auction};
use crate::error::ContractError;
use crate::state::{CONFIG, EPOCH, OWNERSHIP_TRANSFER};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:fair-funding-auction-house";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };

    if msg.payment_denom.is_empty() {
        return Err(ContractError::CustomError { val: String::from("payment_denom can't be empty") });
    }
    if msg.start_token_id > msg.max_token_id {
        return Err(ContractError::InvalidMaxTokenId {});
    }

    let config = Config {
        owner,
        payment_denom: msg.payment_denom,
        nft_contract: deps.api.addr_validate(&msg.nft_contract)?,
        vault: deps.api.addr_validate(&msg.vault_contract)?,
        reserve_price: msg.reserve_price,
        fallback_receiver: deps.api.addr_validate(&msg.fallback_receiver)?,
    };

    //Nothing is up for auction until the owner starts it
    let epoch = Epoch {
        current_epoch_token_id: msg.start_token_id,
        max_token_id: msg.max_token_id,
        epoch_start: 0,
        epoch_end: 0,
        highest_bid: Uint128::zero(),
        highest_bidder: None,
        status: AuctionStatus::Unstarted,
    };

    //Save initial state
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    EPOCH.save(deps.storage, &epoch)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("epoch", format!("{:?}", epoch)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StartAuction { start_time } => start_auction(deps, env, info, start_time),
        ExecuteMsg::Bid { token_id, amount } => bid(deps, env, info, token_id, amount),
        ExecuteMsg::Settle {} => settle(deps, env),
        ExecuteMsg::RefundHighestBidder {} => refund_highest_bidder(deps, env, info),
        ExecuteMsg::SuggestOwner { owner } => suggest_owner(deps, info, owner),
        ExecuteMsg::AcceptOwnership {} => accept_ownership(deps, info),
        ExecuteMsg::SetVault { vault } => set_vault(deps, info, vault),
        ExecuteMsg::SetMaxTokenId { max_token_id } => set_max_token_id(deps, info, max_token_id),
    }
}

fn assert_owner(deps: &DepsMut, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

fn suggest_owner(deps: DepsMut, info: MessageInfo, owner: String) -> Result<Response, ContractError> {
    let config = assert_owner(&deps, &info)?;
    let valid_addr = deps.api.addr_validate(&owner)?;

    //Set owner transfer state
    OWNERSHIP_TRANSFER.save(deps.storage, &valid_addr)?;

    Ok(Response::new()
        .add_attributes(vec![attr("method", "suggest_owner"), attr("owner_transfer", valid_addr.clone())])
        .add_event(
            Event::new("new_owner_suggested")
                .add_attribute("owner", config.owner)
                .add_attribute("suggested_owner", valid_addr),
        ))
}

fn accept_ownership(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    match OWNERSHIP_TRANSFER.may_load(deps.storage)? {
        Some(suggested) if suggested == info.sender => {}
        _ => return Err(ContractError::Unauthorized {}),
    }
    let old_owner = config.owner;
    config.owner = info.sender.clone();
    CONFIG.save(deps.storage, &config)?;
    OWNERSHIP_TRANSFER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_ownership")
        .add_event(
            Event::new("ownership_transferred")
                .add_attribute("old_owner", old_owner)
                .add_attribute("new_owner", info.sender),
        ))
}

fn set_vault(deps: DepsMut, info: MessageInfo, vault: String) -> Result<Response, ContractError> {
    let mut config = assert_owner(&deps, &info)?;
    let vault = deps.api.addr_validate(&vault)?;

    if vault == config.vault {
        return Err(ContractError::SameAsCurrent {});
    }
    config.vault = vault.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_vault")
        .add_event(
            Event::new("vault_updated")
                .add_attribute("actor", info.sender)
                .add_attribute("vault", vault),
        ))
}

fn set_max_token_id(deps: DepsMut, info: MessageInfo, max_token_id: u64) -> Result<Response, ContractError> {
    assert_owner(&deps, &info)?;
    let mut epoch = EPOCH.load(deps.storage)?;

    if max_token_id < epoch.current_epoch_token_id {
        return Err(ContractError::InvalidMaxTokenId {});
    }
    epoch.max_token_id = max_token_id;
    EPOCH.save(deps.storage, &epoch)?;

    Ok(Response::new()
        .add_attribute("method", "set_max_token_id")
        .add_event(
            Event::new("max_token_id_updated")
                .add_attribute("actor", info.sender)
                .add_attribute("max_token_id", max_token_id.to_string()),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::AuctionState {} => to_json_binary(&EPOCH.load(deps.storage)?),
        QueryMsg::OwnershipTransfer {} => to_json_binary(&OwnershipTransferResponse {
            owner: CONFIG.load(deps.storage)?.owner,
            suggested_owner: OWNERSHIP_TRANSFER.may_load(deps.storage)?,
        }),
    }
}
