use cosmwasm_std::{to_json_binary, Addr, Coin, CosmosMsg, StdResult, WasmMsg};
use cosmwasm_schema::cw_serde;

use fair_funding::alchemist::ExecuteMsg as Alchemist_ExecuteMsg;
use fair_funding::vault::{Config, ExecuteMsg};

use crate::ContractError;

/// VaultContract is a wrapper around Addr that provides a lot of helpers
/// for working with this.
#[cw_serde]
pub struct VaultContract(pub Addr);

impl VaultContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
        let msg = to_json_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds,
        }
        .into())
    }
}

/// Builds a call to the configured lending protocol
pub fn alchemist_msg(
    config: &Config,
    msg: Alchemist_ExecuteMsg,
    funds: Vec<Coin>,
) -> Result<CosmosMsg, ContractError> {
    let alchemist = match &config.alchemist {
        Some(alchemist) => alchemist.to_string(),
        None => return Err(ContractError::AlchemistNotSet {}),
    };

    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: alchemist,
        msg: to_json_binary(&msg)?,
        funds,
    }))
}
