use super::*;

/// Create the listing of `asset` at `unit_price`. The init origin becomes the
/// creator of the listing.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log `Created` event.
#[init(
    contract = "AssetListing",
    parameter = "CreateParams",
    enable_logger
)]
fn create_application<S: HasStateApi>(
    ctx: &impl HasInitContext,
    _state_builder: &mut StateBuilder<S>,
    logger: &mut impl HasLogger,
) -> InitResult<State<S>> {
    let params: CreateParams = ctx.parameter_cursor().get()?;

    // Event confirming the listed asset.
    logger
        .log(&CustomEvent::Created(CreatedEvent {
            asset: params.asset,
            unit_price: params.unit_price,
        }))
        .map_err(CustomContractError::from)?;

    Ok(State::new(ctx.init_origin(), params))
}

/// Update the unit price of the listed asset.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is not the creator.
/// - Fails to log `UpdatePrice` event.
#[receive(
    contract = "AssetListing",
    name = "setPrice",
    parameter = "Amount",
    mutable,
    enable_logger
)]
fn set_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let unit_price: Amount = ctx.parameter_cursor().get()?;
    let state = host.state_mut();

    ensure!(
        state.is_creator(&ctx.sender()),
        CustomContractError::Unauthorized.into()
    );

    let previous = state.set_price(unit_price);

    // Event for updated price.
    logger.log(&CustomEvent::UpdatePrice(UpdatePriceEvent {
        previous,
        current: unit_price,
    }))?;

    Ok(())
}

/// Register this contract with the asset ledger so it can take custody of the
/// listed asset. The attached amount is the reserve paid for the registration
/// and stays on the contract balance.
///
/// It rejects if:
/// - Sender is not the creator.
/// - The registration query to the asset ledger fails.
/// - This contract is already registered for the asset.
/// - The attached amount is not exactly `MIN_BALANCE + ASSET_OPT_IN_MIN_BALANCE`.
/// - The asset ledger rejects the zero unit transfer.
/// - Fails to log `OptIn` event.
#[receive(
    contract = "AssetListing",
    name = "optInToAsset",
    mutable,
    payable,
    enable_logger
)]
fn opt_in_to_asset<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let application = application_address(ctx);
    // Attached CCD is always credited to this contract, so the receiver check
    // cannot fail here.
    let payment = MbrPayment {
        receiver: application,
        amount,
    };

    let state = host.state();
    state.check_opt_in(&ctx.sender(), &application, &payment, || {
        host.asset_is_opted_in(&state.asset, application)
            .map_err(|e| CustomContractError::from(e).into())
    })?;
    let asset = state.asset;

    host.asset_opt_in(&asset, application, application)
        .map_err(|_| CustomContractError::AssetTransferRejected)?;

    // Event for registering this contract.
    logger.log(&CustomEvent::OptIn(OptInEvent {
        address: application,
    }))?;

    Ok(())
}

/// Register the sender with the asset ledger so it can receive the listed
/// asset. Open to any address, the state is left untouched.
///
/// It rejects if:
/// - The asset ledger rejects the zero unit transfer, e.g. when the sender
///   cannot cover its reserve.
/// - Fails to log `OptIn` event.
#[receive(
    contract = "AssetListing",
    name = "userOptIn",
    mutable,
    enable_logger
)]
fn user_opt_in<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = ctx.sender();
    let asset = host.state().asset;

    host.asset_opt_in(&asset, application_address(ctx), sender)
        .map_err(|_| CustomContractError::AssetTransferRejected)?;

    // Event for registering the sender.
    logger.log(&CustomEvent::OptIn(OptInEvent { address: sender }))?;

    Ok(())
}

/// Accept units of the listed asset into custody.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is not the asset ledger or the token is not the listed asset.
#[receive(
    contract = "AssetListing",
    name = "onReceivingCIS2",
    parameter = "AssetOnReceivingParams"
)]
fn on_receiving_cis2<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params: AssetOnReceivingParams = ctx.parameter_cursor().get()?;
    let asset = host.state().asset;

    ensure!(
        ctx.sender() == Address::Contract(asset.contract) && params.token_id == asset.id,
        CustomContractError::Unsupported.into()
    );

    Ok(())
}

/// View function that returns the creator, the listed asset and its unit price.
#[receive(contract = "AssetListing", name = "view", return_value = "ListingView")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ListingView> {
    Ok(host.state().view())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use test_infrastructure::*;

    const CREATOR: AccountAddress = AccountAddress([1; 32]);
    const USER_1: AccountAddress = AccountAddress([2; 32]);
    const USER_2: AccountAddress = AccountAddress([3; 32]);
    const ASSET_LEDGER: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const LISTING: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const OTHER_CONTRACT: ContractAddress = ContractAddress {
        index: 3,
        subindex: 0,
    };

    fn asset() -> Asset {
        Asset {
            contract: ASSET_LEDGER,
            id: TokenIdU64(7),
        }
    }

    fn reserve() -> Amount {
        MIN_BALANCE + ASSET_OPT_IN_MIN_BALANCE
    }

    fn receive_ctx<'a>(sender: Address, parameter: &'a [u8]) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(LISTING)
            .set_owner(CREATOR)
            .set_parameter(parameter);
        ctx
    }

    /// Host with a listing of asset `7` at price `100` created by `CREATOR`.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let params = CreateParams {
            asset: asset(),
            unit_price: Amount::from_micro_ccd(100),
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(CREATOR).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let state = create_application(&ctx, &mut state_builder, &mut logger)
            .expect_report("Failed during init_AssetListing");

        TestHost::new(state, state_builder)
    }

    fn mock_is_opted_in(host: &mut TestHost<State<TestStateApi>>, opted_in: bool) {
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            parse_and_check_mock::<OptInQueryParams, _>(
                |params| {
                    params.token_id == TokenIdU64(7)
                        && params.address == Address::Contract(LISTING)
                },
                opted_in,
            ),
        );
    }

    /// Asset ledger accepting a single zero unit transfer of asset `7` from the
    /// listing to `to`.
    fn mock_opt_in_transfer(host: &mut TestHost<State<TestStateApi>>, to: Address) {
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<AssetTransferParams, _>(
                move |params| {
                    params.0.len() == 1
                        && params.0[0].token_id == TokenIdU64(7)
                        && params.0[0].amount == AssetTokenAmount::from(0)
                        && params.0[0].from == Address::Contract(LISTING)
                        && params.0[0].to.address() == to
                },
                (),
            ),
        );
    }

    fn mock_rejected_transfer(host: &mut TestHost<State<TestStateApi>>) {
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            reject_mock(),
        );
    }

    fn view_state(host: &TestHost<State<TestStateApi>>) -> ListingView {
        let ctx = receive_ctx(Address::Account(USER_1), &[]);
        view(&ctx, host).expect_report("Failed to call view")
    }

    #[concordium_test]
    fn test_init() {
        let mut ctx = TestInitContext::empty();
        let params = CreateParams {
            asset: asset(),
            unit_price: Amount::from_micro_ccd(100),
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(CREATOR).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let state = create_application(&ctx, &mut state_builder, &mut logger)
            .expect_report("Contract initialization failed");

        claim_eq!(state.creator, CREATOR);
        claim_eq!(state.asset, asset());
        claim_eq!(state.unit_price, Amount::from_micro_ccd(100));

        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::Created(CreatedEvent {
                asset: asset(),
                unit_price: Amount::from_micro_ccd(100),
            })),
            "Created event should confirm the listed asset"
        );
    }

    #[concordium_test]
    fn test_init_invalid_parameter() {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(CREATOR).set_parameter(&[1, 2, 3]);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let result = create_application(&ctx, &mut state_builder, &mut logger);

        claim!(result.is_err(), "Malformed parameter should be rejected");
    }

    #[concordium_test]
    fn test_view() {
        let host = default_host();

        claim_eq!(
            view_state(&host),
            ListingView {
                creator: CREATOR,
                asset: asset(),
                unit_price: Amount::from_micro_ccd(100),
            }
        );
    }

    #[concordium_test]
    fn test_set_price() {
        let mut host = default_host();
        let bytes = to_bytes(&Amount::from_micro_ccd(150));
        let ctx = receive_ctx(Address::Account(CREATOR), &bytes);
        let mut logger = TestLogger::init();

        let result = set_price(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().unit_price, Amount::from_micro_ccd(150));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::UpdatePrice(UpdatePriceEvent {
                previous: Amount::from_micro_ccd(100),
                current: Amount::from_micro_ccd(150),
            }))]
        );
    }

    #[concordium_test]
    fn test_set_price_zero() {
        let mut host = default_host();
        let bytes = to_bytes(&Amount::zero());
        let ctx = receive_ctx(Address::Account(CREATOR), &bytes);
        let mut logger = TestLogger::init();

        let result = set_price(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().unit_price, Amount::zero());
    }

    #[concordium_test]
    fn test_set_price_unauthorized() {
        let mut host = default_host();
        let bytes = to_bytes(&Amount::from_micro_ccd(200));
        let mut logger = TestLogger::init();

        for sender in [Address::Account(USER_1), Address::Contract(OTHER_CONTRACT)] {
            let ctx = receive_ctx(sender, &bytes);

            let result = set_price(&ctx, &mut host, &mut logger);

            claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        }
        claim_eq!(host.state().unit_price, Amount::from_micro_ccd(100));
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_opt_in_to_asset() {
        let mut host = default_host();
        mock_is_opted_in(&mut host, false);
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::OptIn(OptInEvent {
                address: Address::Contract(LISTING),
            }))]
        );
        claim_eq!(
            view_state(&host),
            ListingView {
                creator: CREATOR,
                asset: asset(),
                unit_price: Amount::from_micro_ccd(100),
            }
        );
    }

    #[concordium_test]
    fn test_opt_in_to_asset_unauthorized() {
        let mut host = default_host();
        mock_is_opted_in(&mut host, false);
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(USER_1), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);

        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_opt_in_to_asset_wrong_amount() {
        let mut host = default_host();
        mock_is_opted_in(&mut host, false);
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let under = Amount::from_micro_ccd(reserve().micro_ccd - 1);
        let over = Amount::from_micro_ccd(reserve().micro_ccd + 1);
        for amount in [under, over, MIN_BALANCE, Amount::zero()] {
            let result = opt_in_to_asset(&ctx, &mut host, amount, &mut logger);

            claim_eq!(result, Err(CustomContractError::PaymentMismatch.into()));
        }
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_opt_in_to_asset_twice() {
        let mut host = default_host();
        mock_is_opted_in(&mut host, false);
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);
        claim_eq!(result, Ok(()));

        // Asset ledger now reports the registration.
        mock_is_opted_in(&mut host, true);

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);
        claim_eq!(result, Err(CustomContractError::AlreadyRegistered.into()));
        claim_eq!(logger.logs.len(), 1, "Only the first call should log");
    }

    #[concordium_test]
    fn test_opt_in_to_asset_query_rejected() {
        let mut host = default_host();
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            reject_mock(),
        );
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::InvokeContractError.into())
        );
    }

    #[concordium_test]
    fn test_opt_in_to_asset_malformed_query_reply() {
        let mut host = default_host();
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            parse_and_ok_mock::<OptInQueryParams, _>(()),
        );
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);

        claim_eq!(result, Err(CustomContractError::Incompatible.into()));
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_opt_in_to_asset_transfer_rejected() {
        let mut host = default_host();
        mock_is_opted_in(&mut host, false);
        mock_rejected_transfer(&mut host);
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        let mut logger = TestLogger::init();

        let result = opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::AssetTransferRejected.into())
        );
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_user_opt_in() {
        let mut host = default_host();
        mock_opt_in_transfer(&mut host, Address::Account(USER_1));
        let ctx = receive_ctx(Address::Account(USER_1), &[]);
        let mut logger = TestLogger::init();

        let result = user_opt_in(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::OptIn(OptInEvent {
                address: Address::Account(USER_1),
            }))]
        );
        claim_eq!(host.state().unit_price, Amount::from_micro_ccd(100));
        claim_eq!(host.state().creator, CREATOR);
    }

    #[concordium_test]
    fn test_user_opt_in_creator_and_contract() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for sender in [Address::Account(CREATOR), Address::Contract(OTHER_CONTRACT)] {
            mock_opt_in_transfer(&mut host, sender);
            let ctx = receive_ctx(sender, &[]);

            let result = user_opt_in(&ctx, &mut host, &mut logger);

            claim_eq!(result, Ok(()));
        }
        claim_eq!(logger.logs.len(), 2);
    }

    #[concordium_test]
    fn test_user_opt_in_rejected() {
        let mut host = default_host();
        mock_rejected_transfer(&mut host);
        let ctx = receive_ctx(Address::Account(USER_2), &[]);
        let mut logger = TestLogger::init();

        let result = user_opt_in(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::AssetTransferRejected.into())
        );
        claim!(logger.logs.is_empty(), "No events should be logged");
    }

    #[concordium_test]
    fn test_on_receiving_listed_asset() {
        let host = default_host();
        let params = AssetOnReceivingParams {
            token_id: TokenIdU64(7),
            amount: AssetTokenAmount::from(10),
            from: Address::Account(CREATOR),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Contract(ASSET_LEDGER), &bytes);

        claim_eq!(on_receiving_cis2(&ctx, &host), Ok(()));
    }

    #[concordium_test]
    fn test_on_receiving_other_asset() {
        let host = default_host();
        let params = AssetOnReceivingParams {
            token_id: TokenIdU64(8),
            amount: AssetTokenAmount::from(10),
            from: Address::Account(CREATOR),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&params);

        let ctx = receive_ctx(Address::Contract(ASSET_LEDGER), &bytes);
        claim_eq!(
            on_receiving_cis2(&ctx, &host),
            Err(CustomContractError::Unsupported.into())
        );

        let params = AssetOnReceivingParams {
            token_id: TokenIdU64(7),
            ..params
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Contract(OTHER_CONTRACT), &bytes);
        claim_eq!(
            on_receiving_cis2(&ctx, &host),
            Err(CustomContractError::Unsupported.into())
        );
    }

    #[concordium_test]
    /// Walk through the lifetime of a listing:
    /// 0. Listing of asset `7` at price `100` is created.
    /// 1. Creator updates the price to `150`.
    /// 2. Another account tries to set the price to `200`. Attempt fails.
    /// 3. Creator registers the contract, paying the exact reserve.
    /// 4. Registering the contract again fails.
    /// 5. Any account registers itself.
    fn test_listing_lifecycle() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let listing = |unit_price: u64| ListingView {
            creator: CREATOR,
            asset: asset(),
            unit_price: Amount::from_micro_ccd(unit_price),
        };
        claim_eq!(view_state(&host), listing(100));

        let bytes = to_bytes(&Amount::from_micro_ccd(150));
        let ctx = receive_ctx(Address::Account(CREATOR), &bytes);
        claim_eq!(set_price(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(view_state(&host), listing(150));

        let bytes = to_bytes(&Amount::from_micro_ccd(200));
        let ctx = receive_ctx(Address::Account(USER_1), &bytes);
        claim_eq!(
            set_price(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );
        claim_eq!(view_state(&host), listing(150));

        mock_is_opted_in(&mut host, false);
        mock_opt_in_transfer(&mut host, Address::Contract(LISTING));
        let ctx = receive_ctx(Address::Account(CREATOR), &[]);
        claim_eq!(
            opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger),
            Ok(())
        );

        mock_is_opted_in(&mut host, true);
        claim_eq!(
            opt_in_to_asset(&ctx, &mut host, reserve(), &mut logger),
            Err(CustomContractError::AlreadyRegistered.into())
        );

        mock_opt_in_transfer(&mut host, Address::Account(USER_2));
        let ctx = receive_ctx(Address::Account(USER_2), &[]);
        claim_eq!(user_opt_in(&ctx, &mut host, &mut logger), Ok(()));

        claim_eq!(view_state(&host), listing(150));
        claim_eq!(logger.logs.len(), 3);
    }
}
