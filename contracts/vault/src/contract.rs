#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, coins, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo,
    Reply, Response, StdError, StdResult, Storage, WasmMsg,
};
use cw2::set_contract_version;

use fair_funding::migrator::ExecuteMsg as Migrator_ExecuteMsg;
use fair_funding::types::{Migration, Pool};
use fair_funding::vault::{Config, ExecuteMsg, InstantiateMsg, QueryMsg, MIGRATION_TIMELOCK};

use crate::error::ContractError;
use crate::positions::{
    claim, liquidate, register_deposit, withdraw_underlying_to_claim, CLAIMABLE_REPLY_ID,
    DEPOSIT_REPLY_ID, LIQUIDATION_REPLY_ID,
};
use crate::query::{
    query_claimable_for_token, query_latest_collateralisation, query_mintable_amount,
    query_ownership_transfers, query_position,
};
use crate::reply::{handle_claimable_reply, handle_deposit_reply, handle_liquidation_reply};
use crate::state::{
    CONFIG, DEPOSITORS, MIGRATION, MIGRATION_ADMIN_TRANSFER, OPERATORS, OWNERSHIP_TRANSFER, POOL,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:fair-funding-vault";
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
    let migration_admin = match msg.migration_admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender.clone(),
    };
    let alchemist = match msg.alchemist {
        Some(alchemist) => Some(deps.api.addr_validate(&alchemist)?),
        None => None,
    };
    let fund_receiver = match msg.fund_receiver {
        Some(receiver) => deps.api.addr_validate(&receiver)?,
        None => owner.clone(),
    };

    let config = Config {
        owner: owner.clone(),
        migration_admin,
        nft_contract: deps.api.addr_validate(&msg.nft_contract)?,
        payment_denom: msg.payment_denom,
        yield_token: msg.yield_token,
        alchemist,
        fund_receiver,
    };
    if config.payment_denom.is_empty() {
        return Err(ContractError::CustomError { val: String::from("payment_denom can't be empty") });
    }

    //Save initial state
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    POOL.save(deps.storage, &Pool::default())?;
    MIGRATION.save(deps.storage, &Migration::default())?;
    //Owner starts out as an operator
    OPERATORS.save(deps.storage, owner.clone(), &true)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("operator", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterDeposit { token_id, amount } => register_deposit(deps, env, info, token_id, amount),
        ExecuteMsg::WithdrawUnderlyingToClaim { shares, min_amount_out } => withdraw_underlying_to_claim(deps, env, info, shares, min_amount_out),
        ExecuteMsg::Claim { token_id } => claim(deps, info, token_id),
        ExecuteMsg::Liquidate { token_id, min_amount_out } => liquidate(deps, env, info, token_id, min_amount_out),
        ExecuteMsg::SetAlchemist { alchemist } => set_alchemist(deps, info, alchemist),
        ExecuteMsg::SetFundReceiver { fund_receiver } => set_fund_receiver(deps, info, fund_receiver),
        ExecuteMsg::AddOperator { operator } => add_operator(deps, info, operator),
        ExecuteMsg::RemoveOperator { operator } => remove_operator(deps, info, operator),
        ExecuteMsg::AddDepositor { depositor } => add_depositor(deps, info, depositor),
        ExecuteMsg::RemoveDepositor { depositor } => remove_depositor(deps, info, depositor),
        ExecuteMsg::SuggestOwner { owner } => suggest_owner(deps, info, owner),
        ExecuteMsg::AcceptOwner {} => accept_owner(deps, info),
        ExecuteMsg::SuggestMigrationAdmin { admin } => suggest_migration_admin(deps, info, admin),
        ExecuteMsg::AcceptMigrationAdmin {} => accept_migration_admin(deps, info),
        ExecuteMsg::ActivateMigration { migrator } => activate_migration(deps, env, info, migrator),
        ExecuteMsg::DeactivateMigration {} => deactivate_migration(deps, info),
        ExecuteMsg::ExecuteMigration {} => execute_migration(deps, env, info),
    }
}

pub fn assert_owner(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

pub fn assert_operator(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if OPERATORS.may_load(storage, sender.clone())?.unwrap_or(false) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized {})
    }
}

pub fn assert_depositor(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if DEPOSITORS.may_load(storage, sender.clone())?.unwrap_or(false) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized {})
    }
}

fn assert_migration_admin(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.migration_admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

/// Role event carrying the subject & the caller
fn role_event(name: &str, subject: &Addr, actor: &Addr) -> Event {
    Event::new(name)
        .add_attribute("subject", subject.to_string())
        .add_attribute("actor", actor.to_string())
}

fn add_operator(deps: DepsMut, info: MessageInfo, operator: String) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    let operator = deps.api.addr_validate(&operator)?;

    OPERATORS.save(deps.storage, operator.clone(), &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_operator")
        .add_event(role_event("new_operator", &operator, &info.sender)))
}

fn remove_operator(deps: DepsMut, info: MessageInfo, operator: String) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    let operator = deps.api.addr_validate(&operator)?;

    OPERATORS.remove(deps.storage, operator.clone());

    Ok(Response::new()
        .add_attribute("method", "remove_operator")
        .add_event(role_event("operator_removed", &operator, &info.sender)))
}

fn add_depositor(deps: DepsMut, info: MessageInfo, depositor: String) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let depositor = deps.api.addr_validate(&depositor)?;

    DEPOSITORS.save(deps.storage, depositor.clone(), &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_depositor")
        .add_event(role_event("new_depositor", &depositor, &info.sender)))
}

fn remove_depositor(deps: DepsMut, info: MessageInfo, depositor: String) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let depositor = deps.api.addr_validate(&depositor)?;

    DEPOSITORS.remove(deps.storage, depositor.clone());

    Ok(Response::new()
        .add_attribute("method", "remove_depositor")
        .add_event(role_event("depositor_removed", &depositor, &info.sender)))
}

fn set_alchemist(deps: DepsMut, info: MessageInfo, alchemist: String) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    let alchemist = deps.api.addr_validate(&alchemist)?;

    if config.alchemist.as_ref() == Some(&alchemist) {
        return Err(ContractError::SameAsCurrent {});
    }
    config.alchemist = Some(alchemist.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_alchemist")
        .add_event(
            Event::new("alchemist_updated")
                .add_attribute("actor", info.sender)
                .add_attribute("alchemist", alchemist),
        ))
}

fn set_fund_receiver(deps: DepsMut, info: MessageInfo, fund_receiver: String) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    let fund_receiver = deps.api.addr_validate(&fund_receiver)?;

    if config.fund_receiver == fund_receiver {
        return Err(ContractError::SameAsCurrent {});
    }
    config.fund_receiver = fund_receiver.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fund_receiver")
        .add_event(
            Event::new("fund_receiver_updated")
                .add_attribute("actor", info.sender)
                .add_attribute("fund_receiver", fund_receiver),
        ))
}

fn suggest_owner(deps: DepsMut, info: MessageInfo, owner: String) -> Result<Response, ContractError> {
    let config = assert_owner(deps.storage, &info.sender)?;
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

fn accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
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
        .add_attribute("method", "accept_owner")
        .add_event(
            Event::new("ownership_transferred")
                .add_attribute("old_owner", old_owner)
                .add_attribute("new_owner", info.sender),
        ))
}

fn suggest_migration_admin(deps: DepsMut, info: MessageInfo, admin: String) -> Result<Response, ContractError> {
    let config = assert_migration_admin(deps.storage, &info.sender)?;
    let valid_addr = deps.api.addr_validate(&admin)?;

    MIGRATION_ADMIN_TRANSFER.save(deps.storage, &valid_addr)?;

    Ok(Response::new()
        .add_attributes(vec![attr("method", "suggest_migration_admin"), attr("admin_transfer", valid_addr.clone())])
        .add_event(
            Event::new("new_migration_admin_suggested")
                .add_attribute("admin", config.migration_admin)
                .add_attribute("suggested_admin", valid_addr),
        ))
}

fn accept_migration_admin(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    match MIGRATION_ADMIN_TRANSFER.may_load(deps.storage)? {
        Some(suggested) if suggested == info.sender => {}
        _ => return Err(ContractError::Unauthorized {}),
    }
    let old_admin = config.migration_admin;
    config.migration_admin = info.sender.clone();
    CONFIG.save(deps.storage, &config)?;
    MIGRATION_ADMIN_TRANSFER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_migration_admin")
        .add_event(
            Event::new("migration_admin_transferred")
                .add_attribute("old_admin", old_admin)
                .add_attribute("new_admin", info.sender),
        ))
}

/// Stages a migration, executable once MIGRATION_TIMELOCK has passed
fn activate_migration(deps: DepsMut, env: Env, info: MessageInfo, migrator: String) -> Result<Response, ContractError> {
    assert_migration_admin(deps.storage, &info.sender)?;
    let migrator = deps.api.addr_validate(&migrator)?;

    let mut migration = MIGRATION.load(deps.storage)?;
    if migration.is_active() {
        return Err(ContractError::MigrationActive {});
    }
    let active_after = env.block.time.seconds() + MIGRATION_TIMELOCK;
    migration.migrator = Some(migrator.clone());
    migration.migration_active = Some(active_after);
    migration.migration_executed = false;
    MIGRATION.save(deps.storage, &migration)?;

    Ok(Response::new()
        .add_attribute("method", "activate_migration")
        .add_event(
            Event::new("migration_activated")
                .add_attribute("migrator", migrator)
                .add_attribute("active_after", active_after.to_string()),
        ))
}

fn deactivate_migration(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    assert_migration_admin(deps.storage, &info.sender)?;

    let mut migration = MIGRATION.load(deps.storage)?;
    migration.migrator = None;
    migration.migration_active = None;
    MIGRATION.save(deps.storage, &migration)?;

    Ok(Response::new()
        .add_attribute("method", "deactivate_migration")
        .add_event(Event::new("migration_deactivated")))
}

/// Hands the vault's liquid payment balance to the migrator
fn execute_migration(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    assert_operator(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;

    let mut migration = MIGRATION.load(deps.storage)?;
    let migrator = match (&migration.migrator, migration.migration_active) {
        (Some(migrator), Some(active_after)) if env.block.time.seconds() >= active_after => migrator.clone(),
        _ => return Err(ContractError::MigrationNotActive {}),
    };
    if migration.migration_executed {
        return Err(ContractError::MigrationAlreadyExecuted {});
    }
    migration.migration_executed = true;
    MIGRATION.save(deps.storage, &migration)?;

    let balance = deps
        .querier
        .query_balance(env.contract.address, config.payment_denom.clone())?
        .amount;
    let funds = if balance.is_zero() {
        vec![]
    } else {
        coins(balance.u128(), config.payment_denom)
    };

    let migrate_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: migrator.to_string(),
        msg: to_json_binary(&Migrator_ExecuteMsg::Migrate {})?,
        funds,
    });

    Ok(Response::new()
        .add_message(migrate_msg)
        .add_attribute("method", "execute_migration")
        .add_event(
            Event::new("migration_executed")
                .add_attribute("migrator", migrator)
                .add_attribute("amount", balance),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> StdResult<Response> {
    match msg.id {
        DEPOSIT_REPLY_ID => handle_deposit_reply(deps, env, msg),
        CLAIMABLE_REPLY_ID => handle_claimable_reply(deps, env, msg),
        LIQUIDATION_REPLY_ID => handle_liquidation_reply(deps, env, msg),
        id => Err(StdError::generic_err(format!("invalid reply id: {}", id))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Position { token_id } => to_json_binary(&query_position(deps, token_id)?),
        QueryMsg::ClaimableForToken { token_id } => to_json_binary(&query_claimable_for_token(deps, token_id)?),
        QueryMsg::Pool {} => to_json_binary(&POOL.load(deps.storage)?),
        QueryMsg::IsOperator { address } => {
            to_json_binary(&OPERATORS.may_load(deps.storage, deps.api.addr_validate(&address)?)?.unwrap_or(false))
        }
        QueryMsg::IsDepositor { address } => {
            to_json_binary(&DEPOSITORS.may_load(deps.storage, deps.api.addr_validate(&address)?)?.unwrap_or(false))
        }
        QueryMsg::Migration {} => to_json_binary(&MIGRATION.load(deps.storage)?),
        QueryMsg::LatestCollateralisation {} => to_json_binary(&query_latest_collateralisation(deps, env)?),
        QueryMsg::MintableAmount { shares } => to_json_binary(&query_mintable_amount(deps, env, shares)?),
        QueryMsg::OwnershipTransfers {} => to_json_binary(&query_ownership_transfers(deps)?),
    }
}
