use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Interface of the lending protocol holding the vault's collateral
#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit `amount` of underlying (sent as funds) for `yield_token` shares credited to `recipient`
    DepositUnderlying {
        yield_token: String,
        amount: Uint128,
        recipient: String,
        min_amount_out: Uint128,
    },
    /// Borrow `amount` of debt against the caller's collateral
    Mint {
        amount: Uint128,
        recipient: String,
    },
    /// Sell `shares` of the caller's collateral to repay debt
    Liquidate {
        yield_token: String,
        shares: Uint128,
        min_amount_out: Uint128,
    },
    /// Burn `shares` and send the underlying to `recipient`
    WithdrawUnderlying {
        yield_token: String,
        shares: Uint128,
        recipient: String,
        min_amount_out: Uint128,
    },
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns AccountResponse
    Account {
        owner: String,
        yield_token: String,
    },
}

#[cw_serde]
pub struct AccountResponse {
    /// Value of the account's collateral in underlying
    pub total_value: Uint128,
    pub debt: Uint128,
    pub shares: Uint128,
}
