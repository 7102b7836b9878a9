use cosmwasm_std::{to_json_binary, Addr, Coin, CosmosMsg, StdResult, WasmMsg};
use cosmwasm_schema::cw_serde;

use fair_funding::auction_house::ExecuteMsg;

/// AuctionHouseContract is a wrapper around Addr that provides a lot of helpers
/// for working with this.
#[cw_serde]
pub struct AuctionHouseContract(pub Addr);

impl AuctionHouseContract {
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
