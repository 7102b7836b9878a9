use cosmwasm_schema::cw_serde;

/// Hook the vault calls on its successor.
/// The vault's liquid payment balance is attached as funds.
#[cw_serde]
pub enum ExecuteMsg {
    Migrate {},
}
