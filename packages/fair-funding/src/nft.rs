use cosmwasm_schema::cw_serde;

/// Minimal interface of the NFT registry.
/// The auction house has to be its minter.
#[cw_serde]
pub enum ExecuteMsg {
    Mint {
        token_id: u64,
        owner: String,
    },
}

#[cw_serde]
pub enum QueryMsg {
    /// Errors for tokens that don't exist
    OwnerOf { token_id: u64 },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}
