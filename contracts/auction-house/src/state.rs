use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use fair_funding::auction_house::Config;
use fair_funding::types::Epoch;

pub const CONFIG: Item<Config> = Item::new("config");
pub const EPOCH: Item<Epoch> = Item::new("epoch");

pub const OWNERSHIP_TRANSFER: Item<Addr> = Item::new("ownership_transfer");
