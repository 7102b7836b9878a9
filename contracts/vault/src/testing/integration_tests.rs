mod tests {

    use crate::helpers::VaultContract;

    use fair_funding::alchemist::AccountResponse;
    use fair_funding::types::{Pool, Position};
    use fair_funding::vault::{ExecuteMsg, InstantiateMsg, QueryMsg, MIGRATION_TIMELOCK};

    use cosmwasm_std::{
        coin, coins, to_json_binary, Addr, BankMsg, Binary, BlockInfo, Empty, Response, StdError,
        StdResult, Uint128,
    };
    use cosmwasm_schema::cw_serde;
    use cw_multi_test::{App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor};
    use cw_storage_plus::{Item, Map};

    const USER: &str = "user";
    const ADMIN: &str = "admin";
    const BOB: &str = "bob";
    const YIELD_SOURCE: &str = "yield_source";
    const FUND_RECEIVER: &str = "fund_receiver";
    const DENOM: &str = "uweth";
    const YIELD_TOKEN: &str = "yvweth";
    const ETH: u128 = 1_000_000_000_000_000_000;

    //Vault Contract
    pub fn vault_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new_with_empty(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        )
        .with_reply(crate::contract::reply);
        Box::new(contract)
    }

    //Mock NFT Contract
    #[cw_serde]
    pub enum NFT_MockExecuteMsg {
        Mint { token_id: u64, owner: String },
        TransferNft { recipient: String, token_id: u64 },
    }

    #[cw_serde]
    pub struct NFT_MockInstantiateMsg {}

    #[cw_serde]
    pub enum NFT_MockQueryMsg {
        OwnerOf { token_id: u64 },
    }

    #[cw_serde]
    pub struct NFT_MockOwnerOfResponse {
        pub owner: String,
    }

    const NFT_OWNERS: Map<u64, String> = Map::new("owners");

    pub fn nft_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            |deps, _, info, msg: NFT_MockExecuteMsg| -> StdResult<Response> {
                match msg {
                    NFT_MockExecuteMsg::Mint { token_id, owner } => {
                        if NFT_OWNERS.has(deps.storage, token_id) {
                            return Err(StdError::generic_err("token already minted"));
                        }
                        NFT_OWNERS.save(deps.storage, token_id, &owner)?;
                        Ok(Response::default())
                    }
                    NFT_MockExecuteMsg::TransferNft { recipient, token_id } => {
                        if NFT_OWNERS.load(deps.storage, token_id)? != info.sender.to_string() {
                            return Err(StdError::generic_err("not the token owner"));
                        }
                        NFT_OWNERS.save(deps.storage, token_id, &recipient)?;
                        Ok(Response::default())
                    }
                }
            },
            |_, _, _, _: NFT_MockInstantiateMsg| -> StdResult<Response> { Ok(Response::default()) },
            |deps, _, msg: NFT_MockQueryMsg| -> StdResult<Binary> {
                match msg {
                    NFT_MockQueryMsg::OwnerOf { token_id } => to_json_binary(&NFT_MockOwnerOfResponse {
                        owner: NFT_OWNERS.load(deps.storage, token_id)?,
                    }),
                }
            },
        );
        Box::new(contract)
    }

    //Mock Alchemist Contract
    //Shares & underlying are 1:1
    #[cw_serde]
    pub enum Alchemist_MockExecuteMsg {
        DepositUnderlying {
            yield_token: String,
            amount: Uint128,
            recipient: String,
            min_amount_out: Uint128,
        },
        Mint {
            amount: Uint128,
            recipient: String,
        },
        Liquidate {
            yield_token: String,
            shares: Uint128,
            min_amount_out: Uint128,
        },
        WithdrawUnderlying {
            yield_token: String,
            shares: Uint128,
            recipient: String,
            min_amount_out: Uint128,
        },
        SetState {
            total_value: Uint128,
            debt: Uint128,
            shares: Uint128,
        },
    }

    #[cw_serde]
    pub struct Alchemist_MockInstantiateMsg {}

    #[cw_serde]
    pub enum Alchemist_MockQueryMsg {
        Account { owner: String, yield_token: String },
        Calls {},
    }

    const ALCHEMIST_ACCOUNT: Item<AccountResponse> = Item::new("account");
    const ALCHEMIST_CALLS: Item<Vec<Alchemist_MockExecuteMsg>> = Item::new("calls");

    pub fn alchemist_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            |deps, _, _, msg: Alchemist_MockExecuteMsg| -> StdResult<Response> {
                let mut account = ALCHEMIST_ACCOUNT.load(deps.storage)?;
                let mut calls = ALCHEMIST_CALLS.load(deps.storage)?;
                calls.push(msg.clone());
                ALCHEMIST_CALLS.save(deps.storage, &calls)?;

                let mut res = Response::default();
                match msg {
                    Alchemist_MockExecuteMsg::DepositUnderlying { amount, .. } => {
                        account.shares += amount;
                        account.total_value += amount;
                    }
                    Alchemist_MockExecuteMsg::Mint { amount, .. } => {
                        account.debt += amount;
                    }
                    Alchemist_MockExecuteMsg::Liquidate { shares, .. } => {
                        account.shares = account.shares.checked_sub(shares)?;
                        account.total_value = account.total_value.saturating_sub(shares);
                        account.debt = account.debt.saturating_sub(shares);
                    }
                    Alchemist_MockExecuteMsg::WithdrawUnderlying { shares, recipient, min_amount_out, .. } => {
                        if shares < min_amount_out {
                            return Err(StdError::generic_err("slippage"));
                        }
                        account.shares = account.shares.checked_sub(shares)?;
                        account.total_value = account.total_value.saturating_sub(shares);
                        res = res.add_message(BankMsg::Send {
                            to_address: recipient,
                            amount: coins(shares.u128(), DENOM),
                        });
                    }
                    Alchemist_MockExecuteMsg::SetState { total_value, debt, shares } => {
                        account = AccountResponse { total_value, debt, shares };
                    }
                }
                ALCHEMIST_ACCOUNT.save(deps.storage, &account)?;

                Ok(res)
            },
            |deps, _, _, _: Alchemist_MockInstantiateMsg| -> StdResult<Response> {
                ALCHEMIST_ACCOUNT.save(deps.storage, &AccountResponse {
                    total_value: Uint128::zero(),
                    debt: Uint128::zero(),
                    shares: Uint128::zero(),
                })?;
                ALCHEMIST_CALLS.save(deps.storage, &vec![])?;
                Ok(Response::default())
            },
            |deps, _, msg: Alchemist_MockQueryMsg| -> StdResult<Binary> {
                match msg {
                    Alchemist_MockQueryMsg::Account { .. } => to_json_binary(&ALCHEMIST_ACCOUNT.load(deps.storage)?),
                    Alchemist_MockQueryMsg::Calls {} => to_json_binary(&ALCHEMIST_CALLS.load(deps.storage)?),
                }
            },
        );
        Box::new(contract)
    }

    //Mock Migrator Contract
    #[cw_serde]
    pub enum Migrator_MockExecuteMsg {
        Migrate {},
    }

    #[cw_serde]
    pub struct Migrator_MockInstantiateMsg {}

    #[cw_serde]
    pub enum Migrator_MockQueryMsg {
        Migrations {},
    }

    const MIGRATIONS: Item<u64> = Item::new("migrations");

    pub fn migrator_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            |deps, _, _, msg: Migrator_MockExecuteMsg| -> StdResult<Response> {
                match msg {
                    Migrator_MockExecuteMsg::Migrate {} => {
                        let count = MIGRATIONS.may_load(deps.storage)?.unwrap_or(0);
                        MIGRATIONS.save(deps.storage, &(count + 1))?;
                        Ok(Response::default())
                    }
                }
            },
            |_, _, _, _: Migrator_MockInstantiateMsg| -> StdResult<Response> { Ok(Response::default()) },
            |deps, _, msg: Migrator_MockQueryMsg| -> StdResult<Binary> {
                match msg {
                    Migrator_MockQueryMsg::Migrations {} => {
                        to_json_binary(&MIGRATIONS.may_load(deps.storage)?.unwrap_or(0))
                    }
                }
            },
        );
        Box::new(contract)
    }

    fn mock_app() -> App {
        AppBuilder::new().build(|router, _, storage| {
            let bank = BankKeeper::new();

            bank.init_balance(storage, &Addr::unchecked(USER), vec![coin(1_000_000 * ETH, DENOM)])
                .unwrap();
            bank.init_balance(storage, &Addr::unchecked(ADMIN), vec![coin(1_000_000 * ETH, DENOM)])
                .unwrap();
            bank.init_balance(storage, &Addr::unchecked(YIELD_SOURCE), vec![coin(1_000_000 * ETH, DENOM)])
                .unwrap();

            router.bank = bank;
        })
    }

    pub struct Suite {
        pub app: App,
        pub vault: VaultContract,
        pub nft: Addr,
        pub alchemist: Addr,
        pub migrator: Addr,
    }

    pub fn proper_instantiate() -> Suite {
        let mut app = mock_app();

        //Instantiate NFT
        let nft_id = app.store_code(nft_contract());
        let nft = app
            .instantiate_contract(nft_id, Addr::unchecked(ADMIN), &NFT_MockInstantiateMsg {}, &[], "nft", None)
            .unwrap();

        //Instantiate Alchemist
        let alchemist_id = app.store_code(alchemist_contract());
        let alchemist = app
            .instantiate_contract(
                alchemist_id,
                Addr::unchecked(ADMIN),
                &Alchemist_MockInstantiateMsg {},
                &[],
                "alchemist",
                None,
            )
            .unwrap();

        //Instantiate Migrator
        let migrator_id = app.store_code(migrator_contract());
        let migrator = app
            .instantiate_contract(
                migrator_id,
                Addr::unchecked(ADMIN),
                &Migrator_MockInstantiateMsg {},
                &[],
                "migrator",
                None,
            )
            .unwrap();

        //Instantiate Vault
        let vault_id = app.store_code(vault_contract());
        let msg = InstantiateMsg {
            owner: None,
            migration_admin: None,
            nft_contract: nft.to_string(),
            payment_denom: String::from(DENOM),
            yield_token: String::from(YIELD_TOKEN),
            alchemist: Some(alchemist.to_string()),
            fund_receiver: Some(String::from(FUND_RECEIVER)),
        };
        let vault_addr = app
            .instantiate_contract(vault_id, Addr::unchecked(ADMIN), &msg, &[], "vault", None)
            .unwrap();

        Suite {
            app,
            vault: VaultContract(vault_addr),
            nft,
            alchemist,
            migrator,
        }
    }

    impl Suite {
        fn mint_nft(&mut self, token_id: u64, owner: &str) {
            self.app
                .execute_contract(
                    Addr::unchecked(ADMIN),
                    self.nft.clone(),
                    &NFT_MockExecuteMsg::Mint { token_id, owner: String::from(owner) },
                    &[],
                )
                .unwrap();
        }

        fn add_depositor(&mut self, depositor: &str) {
            let cosmos_msg = self
                .vault
                .call(ExecuteMsg::AddDepositor { depositor: String::from(depositor) }, vec![])
                .unwrap();
            self.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap();
        }

        /// Errors carry the root cause
        fn deposit(&mut self, sender: &str, token_id: u64, amount: u128) -> Result<AppResponse, String> {
            let cosmos_msg = self
                .vault
                .call(
                    ExecuteMsg::RegisterDeposit { token_id, amount: Uint128::new(amount) },
                    coins(amount, DENOM),
                )
                .unwrap();
            self.app
                .execute(Addr::unchecked(sender), cosmos_msg)
                .map_err(|err| err.root_cause().to_string())
        }

        fn set_alchemist_state(&mut self, total_value: u128, debt: u128, shares: u128) {
            self.app
                .execute_contract(
                    Addr::unchecked(ADMIN),
                    self.alchemist.clone(),
                    &Alchemist_MockExecuteMsg::SetState {
                        total_value: Uint128::new(total_value),
                        debt: Uint128::new(debt),
                        shares: Uint128::new(shares),
                    },
                    &[],
                )
                .unwrap();
        }

        fn alchemist_account(&self) -> AccountResponse {
            self.app
                .wrap()
                .query_wasm_smart(
                    self.alchemist.clone(),
                    &Alchemist_MockQueryMsg::Account {
                        owner: self.vault.addr().to_string(),
                        yield_token: String::from(YIELD_TOKEN),
                    },
                )
                .unwrap()
        }

        fn alchemist_calls(&self) -> Vec<Alchemist_MockExecuteMsg> {
            self.app
                .wrap()
                .query_wasm_smart(self.alchemist.clone(), &Alchemist_MockQueryMsg::Calls {})
                .unwrap()
        }

        fn position(&self, token_id: u64) -> Position {
            self.app
                .wrap()
                .query_wasm_smart(self.vault.addr(), &QueryMsg::Position { token_id })
                .unwrap()
        }

        fn pool(&self) -> Pool {
            self.app
                .wrap()
                .query_wasm_smart(self.vault.addr(), &QueryMsg::Pool {})
                .unwrap()
        }

        fn claimable(&self, token_id: u64) -> Uint128 {
            self.app
                .wrap()
                .query_wasm_smart(self.vault.addr(), &QueryMsg::ClaimableForToken { token_id })
                .unwrap()
        }

        fn balance(&self, address: &str) -> Uint128 {
            self.app.wrap().query_balance(address, DENOM).unwrap().amount
        }

        /// Sends `amount` of yield to the alchemist & withdraws it to the vault as claimable
        fn harvest(&mut self, amount: u128) -> AppResponse {
            self.app
                .send_tokens(Addr::unchecked(YIELD_SOURCE), self.alchemist.clone(), &coins(amount, DENOM))
                .unwrap();
            let account = self.alchemist_account();
            self.set_alchemist_state(
                account.total_value.u128() + amount,
                account.debt.u128(),
                account.shares.u128() + amount,
            );

            let cosmos_msg = self
                .vault
                .call(
                    ExecuteMsg::WithdrawUnderlyingToClaim {
                        shares: Uint128::new(amount),
                        min_amount_out: Uint128::one(),
                    },
                    vec![],
                )
                .unwrap();
            self.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap()
        }

        fn advance_time(&mut self, seconds: u64) {
            self.app.set_block(BlockInfo {
                height: self.app.block_info().height,
                time: self.app.block_info().time.plus_seconds(seconds),
                chain_id: self.app.block_info().chain_id,
            });
        }
    }

    /// Value of `key` in the first `ty` event
    fn event_attr(res: &AppResponse, ty: &str, key: &str) -> Option<String> {
        res.events
            .iter()
            .find(|event| event.ty == ty)
            .and_then(|event| event.attributes.iter().find(|attr| attr.key == key))
            .map(|attr| attr.value.clone())
    }

    mod vault {

        use super::*;

        #[test]
        fn deposit_mints_half_minus_one() {
            let mut suite = proper_instantiate();
            let amount = 12345 * ETH;
            suite.mint_nft(1, USER);
            suite.add_depositor(USER);

            let res = suite.deposit(USER, 1, amount).unwrap();

            //Position (1, 12345e18, 0, 12345e18, false)
            assert_eq!(
                suite.position(1),
                Position {
                    token_id: 1,
                    amount_deposited: Uint128::new(amount),
                    amount_claimed: Uint128::zero(),
                    shares_owned: Uint128::new(amount),
                    is_liquidated: false,
                }
            );
            assert_eq!(suite.pool().total_shares, Uint128::new(amount));

            //Deposit & mint parameters
            let expected_mint = Uint128::new(amount / 2 - 1);
            assert_eq!(
                suite.alchemist_calls(),
                vec![
                    Alchemist_MockExecuteMsg::DepositUnderlying {
                        yield_token: String::from(YIELD_TOKEN),
                        amount: Uint128::new(amount),
                        recipient: suite.vault.addr().to_string(),
                        min_amount_out: Uint128::one(),
                    },
                    Alchemist_MockExecuteMsg::Mint {
                        amount: expected_mint,
                        recipient: String::from(FUND_RECEIVER),
                    },
                ]
            );
            assert_eq!(suite.balance(suite.alchemist.as_str()), Uint128::new(amount));

            //Events
            assert_eq!(event_attr(&res, "wasm-deposit", "depositor"), Some(String::from(USER)));
            assert_eq!(event_attr(&res, "wasm-deposit", "token_id"), Some(String::from("1")));
            assert_eq!(event_attr(&res, "wasm-deposit", "amount"), Some(amount.to_string()));
            assert_eq!(event_attr(&res, "wasm-funded", "recipient"), Some(String::from(FUND_RECEIVER)));
            assert_eq!(event_attr(&res, "wasm-funded", "amount"), Some(expected_mint.to_string()));

            //Stays within 50% LTV
            let account = suite.alchemist_account();
            assert!(account.debt * Uint128::new(2) <= account.total_value);
        }

        #[test]
        fn deposits_stay_within_ltv() {
            let mut suite = proper_instantiate();
            for (token_id, amount) in vec![(1u64, 100 * ETH), (2, 300 * ETH), (3, 7 * ETH + 3)] {
                suite.mint_nft(token_id, USER);
                suite.deposit(ADMIN, token_id, amount).unwrap();

                let account = suite.alchemist_account();
                assert!(account.debt * Uint128::new(2) <= account.total_value);
            }

            //Total shares is the sum of the live positions
            let sum = suite.position(1).shares_owned + suite.position(2).shares_owned + suite.position(3).shares_owned;
            assert_eq!(suite.pool().total_shares, sum);
        }

        #[test]
        fn deposit_reverts_when_nothing_can_be_minted() {
            let mut suite = proper_instantiate();
            suite.mint_nft(0, USER);
            //Vault is already at 50% LTV after the deposit lands
            suite.set_alchemist_state(0, 5 * ETH, 0);

            let err = suite.deposit(ADMIN, 0, 10 * ETH).unwrap_err();
            assert!(err.contains("cannot mint new Alchemix debt"));

            //Nothing was recorded
            assert_eq!(suite.position(0), Position::empty(0));
            assert_eq!(suite.pool().total_shares, Uint128::zero());
            assert_eq!(suite.balance(suite.alchemist.as_str()), Uint128::zero());
        }

        #[test]
        fn deposit_preconditions() {
            let mut suite = proper_instantiate();
            suite.mint_nft(0, USER);

            //Not a depositor
            let err = suite.deposit(USER, 0, ETH).unwrap_err();
            assert_eq!(err, String::from("Unauthorized"));

            //Token doesn't exist
            let err = suite.deposit(ADMIN, 99, ETH).unwrap_err();
            assert_eq!(err, String::from("Custom Error val: \"token 99 does not exist\""));

            //Once per token
            suite.deposit(ADMIN, 0, 10 * ETH).unwrap();
            let err = suite.deposit(ADMIN, 0, 10 * ETH).unwrap_err();
            assert_eq!(err, String::from("can only deposit once per token"));

            //Liquidated positions can't be topped up
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::zero() }, vec![])
                .unwrap();
            suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();
            let err = suite.deposit(ADMIN, 0, 10 * ETH).unwrap_err();
            assert_eq!(err, String::from("position already liquidated"));
        }

        #[test]
        fn deposit_requires_an_alchemist() {
            let mut app = mock_app();
            let nft_id = app.store_code(nft_contract());
            let nft = app
                .instantiate_contract(nft_id, Addr::unchecked(ADMIN), &NFT_MockInstantiateMsg {}, &[], "nft", None)
                .unwrap();
            app.execute_contract(
                Addr::unchecked(ADMIN),
                nft.clone(),
                &NFT_MockExecuteMsg::Mint { token_id: 0, owner: String::from(USER) },
                &[],
            )
            .unwrap();

            let vault_id = app.store_code(vault_contract());
            let msg = InstantiateMsg {
                owner: None,
                migration_admin: None,
                nft_contract: nft.to_string(),
                payment_denom: String::from(DENOM),
                yield_token: String::from(YIELD_TOKEN),
                alchemist: None,
                fund_receiver: None,
            };
            let vault = VaultContract(
                app.instantiate_contract(vault_id, Addr::unchecked(ADMIN), &msg, &[], "vault", None)
                    .unwrap(),
            );

            let cosmos_msg = vault
                .call(ExecuteMsg::RegisterDeposit { token_id: 0, amount: Uint128::new(ETH) }, coins(ETH, DENOM))
                .unwrap();
            let err = app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("alchemist not set"));
        }

        #[test]
        fn yield_distribution_and_claims() {
            let mut suite = proper_instantiate();
            suite.mint_nft(1, USER);
            suite.mint_nft(2, BOB);
            suite.deposit(ADMIN, 1, 100 * ETH).unwrap();
            suite.deposit(ADMIN, 2, 300 * ETH).unwrap();

            //Operators only
            let cosmos_msg = suite
                .vault
                .call(
                    ExecuteMsg::WithdrawUnderlyingToClaim { shares: Uint128::new(ETH), min_amount_out: Uint128::one() },
                    vec![],
                )
                .unwrap();
            let err = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("Unauthorized"));

            let res = suite.harvest(40 * ETH);
            assert_eq!(event_attr(&res, "wasm-claimable", "amount"), Some((40 * ETH).to_string()));
            assert_eq!(event_attr(&res, "wasm-claimable", "min_amount_out"), Some(String::from("1")));
            assert_eq!(suite.balance(suite.vault.addr().as_str()), Uint128::new(40 * ETH));

            //Withdrawal went to the vault itself
            let calls = suite.alchemist_calls();
            assert_eq!(
                calls.last(),
                Some(&Alchemist_MockExecuteMsg::WithdrawUnderlying {
                    yield_token: String::from(YIELD_TOKEN),
                    shares: Uint128::new(40 * ETH),
                    recipient: suite.vault.addr().to_string(),
                    min_amount_out: Uint128::one(),
                })
            );

            //40e18 over 400e18 shares
            assert_eq!(suite.pool().amount_claimable_per_share, Uint128::new(100_000));
            assert_eq!(suite.claimable(1), Uint128::new(10 * ETH));
            assert_eq!(suite.claimable(2), Uint128::new(30 * ETH));

            //Only the token owner claims
            let cosmos_msg = suite.vault.call(ExecuteMsg::Claim { token_id: 1 }, vec![]).unwrap();
            let err = suite.app.execute(Addr::unchecked(BOB), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("only token owner can claim"));

            let user_balance = suite.balance(USER);
            let cosmos_msg = suite.vault.call(ExecuteMsg::Claim { token_id: 1 }, vec![]).unwrap();
            let res = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();
            assert_eq!(event_attr(&res, "wasm-claimed", "token_id"), Some(String::from("1")));
            assert_eq!(event_attr(&res, "wasm-claimed", "owner"), Some(String::from(USER)));
            assert_eq!(event_attr(&res, "wasm-claimed", "amount"), Some((10 * ETH).to_string()));
            assert_eq!(suite.balance(USER), user_balance + Uint128::new(10 * ETH));
            assert_eq!(suite.position(1).amount_claimed, Uint128::new(10 * ETH));

            //Nothing left
            let cosmos_msg = suite.vault.call(ExecuteMsg::Claim { token_id: 1 }, vec![]).unwrap();
            let err = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("nothing to claim"));

            //Claims follow the NFT
            suite
                .app
                .execute_contract(
                    Addr::unchecked(BOB),
                    suite.nft.clone(),
                    &NFT_MockExecuteMsg::TransferNft { recipient: String::from(USER), token_id: 2 },
                    &[],
                )
                .unwrap();
            let cosmos_msg = suite.vault.call(ExecuteMsg::Claim { token_id: 2 }, vec![]).unwrap();
            suite.app.execute(Addr::unchecked(BOB), cosmos_msg).unwrap_err();
            let cosmos_msg = suite.vault.call(ExecuteMsg::Claim { token_id: 2 }, vec![]).unwrap();
            suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            //Accumulator only grows & claims never exceed the distributed share
            suite.harvest(4 * ETH);
            let pool = suite.pool();
            assert_eq!(pool.amount_claimable_per_share, Uint128::new(110_000));
            for token_id in [1u64, 2u64] {
                let position = suite.position(token_id);
                let entitled = position.shares_owned.multiply_ratio(pool.amount_claimable_per_share, 1_000_000u128);
                assert!(suite.claimable(token_id) + position.amount_claimed <= entitled);
            }
            assert_eq!(suite.claimable(1), Uint128::new(ETH));
            assert_eq!(suite.claimable(2), Uint128::new(3 * ETH));
        }

        #[test]
        fn liquidate_repays_debt_and_withdraws_the_rest() {
            let mut suite = proper_instantiate();
            let amount = 123 * ETH;
            suite.mint_nft(0, USER);
            suite.add_depositor(USER);
            suite.deposit(USER, 0, amount).unwrap();
            //200% collateralised
            suite.set_alchemist_state(amount, amount / 2, amount);

            let user_balance = suite.balance(USER);
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::new(amount / 2) }, vec![])
                .unwrap();
            let res = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            let calls = suite.alchemist_calls();
            assert_eq!(
                calls[calls.len() - 2..].to_vec(),
                vec![
                    Alchemist_MockExecuteMsg::Liquidate {
                        yield_token: String::from(YIELD_TOKEN),
                        shares: Uint128::new(amount / 2),
                        min_amount_out: Uint128::one(),
                    },
                    Alchemist_MockExecuteMsg::WithdrawUnderlying {
                        yield_token: String::from(YIELD_TOKEN),
                        shares: Uint128::new(amount / 2),
                        recipient: suite.vault.addr().to_string(),
                        min_amount_out: Uint128::new(amount / 2),
                    },
                ]
            );

            //Withdrawn collateral is forwarded to the owner
            assert_eq!(suite.balance(USER), user_balance + Uint128::new(amount / 2));
            assert_eq!(suite.balance(suite.vault.addr().as_str()), Uint128::zero());
            assert_eq!(event_attr(&res, "wasm-liquidated", "token_id"), Some(String::from("0")));
            assert_eq!(event_attr(&res, "wasm-liquidated", "owner"), Some(String::from(USER)));
            assert_eq!(event_attr(&res, "wasm-liquidated", "amount_out"), Some((amount / 2).to_string()));

            let position = suite.position(0);
            assert!(position.is_liquidated);
            assert_eq!(position.shares_owned, Uint128::zero());
            assert_eq!(position.amount_deposited, Uint128::new(amount));
            assert_eq!(suite.pool().total_shares, Uint128::zero());

            //A second liquidation fails & changes nothing
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::zero() }, vec![])
                .unwrap();
            let err = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("position already liquidated"));
            assert_eq!(suite.position(0), position);
            assert_eq!(suite.alchemist_calls().len(), calls.len());
        }

        #[test]
        fn liquidate_takes_remaining_shares_into_account() {
            let mut suite = proper_instantiate();
            suite.mint_nft(0, USER);
            suite.deposit(ADMIN, 0, 10 * ETH).unwrap();
            assert_eq!(suite.pool().total_shares, Uint128::new(10 * ETH));
            assert_eq!(suite.position(0).shares_owned, Uint128::new(10 * ETH));

            //Half the shares are gone, collateralisation of 4
            suite.set_alchemist_state(10 * ETH, 25 * ETH / 10, 5 * ETH);

            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::one() }, vec![])
                .unwrap();
            suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            assert_eq!(suite.pool().total_shares, Uint128::zero());
            assert_eq!(suite.alchemist_account().shares, Uint128::zero());
        }

        #[test]
        fn liquidate_with_dust_debt_returns_the_collateral() {
            let mut suite = proper_instantiate();
            let amount = 1000 * ETH;
            suite.mint_nft(0, USER);
            suite.deposit(ADMIN, 0, amount).unwrap();
            //Loan almost fully repaid
            suite.set_alchemist_state(amount, 1, amount);

            let user_balance = suite.balance(USER);
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::new(amount - 1) }, vec![])
                .unwrap();
            let res = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            let calls = suite.alchemist_calls();
            assert_eq!(
                calls[calls.len() - 2..].to_vec(),
                vec![
                    Alchemist_MockExecuteMsg::Liquidate {
                        yield_token: String::from(YIELD_TOKEN),
                        shares: Uint128::one(),
                        min_amount_out: Uint128::one(),
                    },
                    Alchemist_MockExecuteMsg::WithdrawUnderlying {
                        yield_token: String::from(YIELD_TOKEN),
                        shares: Uint128::new(amount - 1),
                        recipient: suite.vault.addr().to_string(),
                        min_amount_out: Uint128::new(amount - 1),
                    },
                ]
            );
            assert_eq!(suite.balance(USER), user_balance + Uint128::new(amount - 1));
            assert_eq!(event_attr(&res, "wasm-liquidated", "amount_out"), Some((amount - 1).to_string()));
        }

        #[test]
        fn liquidate_without_debt_withdraws_everything() {
            let mut suite = proper_instantiate();
            suite.mint_nft(0, USER);
            suite.deposit(ADMIN, 0, 10 * ETH).unwrap();
            suite.set_alchemist_state(10 * ETH, 0, 10 * ETH);
            let calls_before = suite.alchemist_calls().len();

            let user_balance = suite.balance(USER);
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::new(10 * ETH) }, vec![])
                .unwrap();
            suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            //Withdraw only, no debt to clear
            let calls = suite.alchemist_calls();
            assert_eq!(calls.len(), calls_before + 1);
            assert_eq!(suite.balance(USER), user_balance + Uint128::new(10 * ETH));
        }

        #[test]
        fn liquidate_pays_out_claimable_first() {
            let mut suite = proper_instantiate();
            suite.mint_nft(1, USER);
            suite.mint_nft(2, BOB);
            suite.deposit(ADMIN, 1, 100 * ETH).unwrap();
            suite.deposit(ADMIN, 2, 300 * ETH).unwrap();
            suite.harvest(40 * ETH);

            let user_balance = suite.balance(USER);
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 1, min_amount_out: Uint128::zero() }, vec![])
                .unwrap();
            let res = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap();

            assert_eq!(event_attr(&res, "wasm-claimed", "amount"), Some((10 * ETH).to_string()));
            let amount_out: u128 = event_attr(&res, "wasm-liquidated", "amount_out").unwrap().parse().unwrap();
            assert!(amount_out > 0);
            assert_eq!(suite.balance(USER), user_balance + Uint128::new(10 * ETH + amount_out));

            let position = suite.position(1);
            assert!(position.is_liquidated);
            assert_eq!(position.amount_claimed, Uint128::new(10 * ETH));
            assert_eq!(suite.pool().total_shares, Uint128::new(300 * ETH));

            //Other holders keep their yield
            assert_eq!(suite.claimable(2), Uint128::new(30 * ETH));
            assert_eq!(suite.balance(suite.vault.addr().as_str()), Uint128::new(30 * ETH));
        }

        #[test]
        fn liquidate_preconditions() {
            let mut suite = proper_instantiate();
            suite.mint_nft(0, USER);
            suite.mint_nft(1, USER);
            suite.deposit(ADMIN, 0, 10 * ETH).unwrap();

            //Only the token owner
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::zero() }, vec![])
                .unwrap();
            let err = suite.app.execute(Addr::unchecked(BOB), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("only token owner can liquidate"));

            //Never deposited
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 1, min_amount_out: Uint128::zero() }, vec![])
                .unwrap();
            let err = suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("position does not exist"));

            //Slippage reverts the whole liquidation
            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::Liquidate { token_id: 0, min_amount_out: Uint128::new(100 * ETH) }, vec![])
                .unwrap();
            suite.app.execute(Addr::unchecked(USER), cosmos_msg).unwrap_err();
            let position = suite.position(0);
            assert!(!position.is_liquidated);
            assert_eq!(position.shares_owned, Uint128::new(10 * ETH));
            assert_eq!(suite.pool().total_shares, Uint128::new(10 * ETH));
        }

        #[test]
        fn collateral_queries() {
            let mut suite = proper_instantiate();
            suite.set_alchemist_state(10 * ETH, 5 * ETH, 10 * ETH);

            let collateralisation: cosmwasm_std::Decimal = suite
                .app
                .wrap()
                .query_wasm_smart(suite.vault.addr(), &QueryMsg::LatestCollateralisation {})
                .unwrap();
            assert_eq!(collateralisation, cosmwasm_std::Decimal::percent(200));

            let mintable: fair_funding::vault::MintableAmountResponse = suite
                .app
                .wrap()
                .query_wasm_smart(suite.vault.addr(), &QueryMsg::MintableAmount { shares: Uint128::new(4 * ETH) })
                .unwrap();
            assert_eq!(mintable.max_mintable_amount, Uint128::zero());
            assert_eq!(mintable.mintable_by_shares, Uint128::new(2 * ETH - 1));
            assert_eq!(mintable.amount_to_mint, Uint128::zero());

            //Zero debt
            suite.set_alchemist_state(10 * ETH, 0, 10 * ETH);
            let err = suite
                .app
                .wrap()
                .query_wasm_smart::<cosmwasm_std::Decimal>(suite.vault.addr(), &QueryMsg::LatestCollateralisation {})
                .unwrap_err();
            assert!(err.to_string().contains("zero debt"));
        }

        #[test]
        fn migration_moves_liquid_balance() {
            let mut suite = proper_instantiate();
            suite.mint_nft(1, USER);
            suite.deposit(ADMIN, 1, 100 * ETH).unwrap();
            suite.harvest(20 * ETH);

            let cosmos_msg = suite
                .vault
                .call(ExecuteMsg::ActivateMigration { migrator: suite.migrator.to_string() }, vec![])
                .unwrap();
            suite.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap();

            //Timelocked
            let cosmos_msg = suite.vault.call(ExecuteMsg::ExecuteMigration {}, vec![]).unwrap();
            let err = suite.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("migration not active"));

            suite.advance_time(MIGRATION_TIMELOCK);
            let cosmos_msg = suite.vault.call(ExecuteMsg::ExecuteMigration {}, vec![]).unwrap();
            suite.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap();

            assert_eq!(suite.balance(suite.migrator.as_str()), Uint128::new(20 * ETH));
            assert_eq!(suite.balance(suite.vault.addr().as_str()), Uint128::zero());
            let migrations: u64 = suite
                .app
                .wrap()
                .query_wasm_smart(suite.migrator.clone(), &Migrator_MockQueryMsg::Migrations {})
                .unwrap();
            assert_eq!(migrations, 1);

            let cosmos_msg = suite.vault.call(ExecuteMsg::ExecuteMigration {}, vec![]).unwrap();
            let err = suite.app.execute(Addr::unchecked(ADMIN), cosmos_msg).unwrap_err();
            assert_eq!(err.root_cause().to_string(), String::from("migration already executed"));
        }
    }
}
