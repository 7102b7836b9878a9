use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, MessageInfo, QuerierWrapper, QueryRequest,
    StdError, StdResult, Uint128, WasmQuery,
};

use crate::alchemist::{AccountResponse, QueryMsg as Alchemist_QueryMsg};
use crate::nft::{OwnerOfResponse, QueryMsg as NFT_QueryMsg};

/// Asserts the message carries exactly `amount` of `denom` and nothing else
pub fn assert_sent_exact_native_amount(
    message_info: &MessageInfo,
    denom: &str,
    amount: Uint128,
) -> StdResult<()> {
    if amount.is_zero() {
        return Err(StdError::generic_err("amount was zero, must be positive"));
    }
    if message_info.funds.len() != 1 {
        return Err(StdError::generic_err(format!(
            "Send exactly {}{} and no other tokens",
            amount, denom
        )));
    }

    match message_info.funds.iter().find(|x| x.denom == denom) {
        Some(coin) => {
            if coin.amount != amount {
                return Err(StdError::generic_err(format!(
                    "Sent amount {} differs from the stated amount {}",
                    coin.amount, amount
                )));
            }
        }
        None => {
            return Err(StdError::generic_err(
                "Incorrect denomination, sent asset denom and payment denom differ",
            ))
        }
    }

    Ok(())
}

/// Creates a bank send of `amount` of `denom`
pub fn native_send_msg(recipient: String, denom: String, amount: Uint128) -> CosmosMsg {
    CosmosMsg::Bank(BankMsg::Send {
        to_address: recipient,
        amount: vec![Coin { denom, amount }],
    })
}

/// Returns the current owner of `token_id` from the NFT registry.
/// Errors if the token doesn't exist.
pub fn query_token_owner(
    querier: QuerierWrapper,
    nft_contract: String,
    token_id: u64,
) -> StdResult<Addr> {
    let resp: OwnerOfResponse = querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: nft_contract,
        msg: to_json_binary(&NFT_QueryMsg::OwnerOf { token_id })?,
    }))?;

    Ok(Addr::unchecked(resp.owner))
}

/// Returns the lending protocol's books for `owner`
pub fn query_alchemist_account(
    querier: QuerierWrapper,
    alchemist: String,
    owner: String,
    yield_token: String,
) -> StdResult<AccountResponse> {
    querier.query::<AccountResponse>(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: alchemist,
        msg: to_json_binary(&Alchemist_QueryMsg::Account { owner, yield_token })?,
    }))
}
