use super::*;

// Functions for creating and updating the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates the listing state, owned by `creator`.
    pub fn new(creator: AccountAddress, params: CreateParams) -> Self {
        Self {
            creator,
            asset: params.asset,
            unit_price: params.unit_price,
            phantom_data: PhantomData,
        }
    }

    pub fn is_creator(&self, address: &Address) -> bool {
        address.matches_account(&self.creator)
    }

    /// Overwrite the unit price and return the previous one.
    ///
    /// Any price is accepted, including zero.
    pub fn set_price(&mut self, unit_price: Amount) -> Amount {
        let previous = self.unit_price;
        self.unit_price = unit_price;
        previous
    }

    /// Validates a request to register the contract itself for the listed asset.
    ///
    /// Checks run in order and stop at the first failure:
    /// - `sender` is the creator;
    /// - `application` is not registered yet, as reported by `is_opted_in`;
    /// - the payment goes to `application`;
    /// - the payment is exactly the opt in reserve.
    ///
    /// `is_opted_in` is only queried once the sender has been authorized.
    pub fn check_opt_in(
        &self,
        sender: &Address,
        application: &Address,
        payment: &MbrPayment,
        is_opted_in: impl FnOnce() -> ContractResult<bool>,
    ) -> ContractResult<()> {
        ensure!(
            self.is_creator(sender),
            CustomContractError::Unauthorized.into()
        );
        ensure!(!is_opted_in()?, CustomContractError::AlreadyRegistered.into());
        ensure!(
            payment.receiver == *application,
            CustomContractError::PaymentMismatch.into()
        );
        ensure!(
            Some(payment.amount) == opt_in_reserve(),
            CustomContractError::PaymentMismatch.into()
        );

        Ok(())
    }

    pub fn view(&self) -> ListingView {
        ListingView {
            creator: self.creator,
            asset: self.asset,
            unit_price: self.unit_price,
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const CREATOR: AccountAddress = AccountAddress([1; 32]);
    const USER: AccountAddress = AccountAddress([2; 32]);
    const LISTING: Address = Address::Contract(ContractAddress {
        index: 2,
        subindex: 0,
    });

    fn state() -> State<TestStateApi> {
        State::new(
            CREATOR,
            CreateParams {
                asset: Asset {
                    contract: ContractAddress {
                        index: 1,
                        subindex: 0,
                    },
                    id: TokenIdU64(7),
                },
                unit_price: Amount::from_micro_ccd(100),
            },
        )
    }

    fn reserve() -> Amount {
        MIN_BALANCE + ASSET_OPT_IN_MIN_BALANCE
    }

    fn payment(receiver: Address, amount: Amount) -> MbrPayment {
        MbrPayment { receiver, amount }
    }

    #[concordium_test]
    fn test_set_price_returns_previous() {
        let mut state = state();

        claim_eq!(
            state.set_price(Amount::zero()),
            Amount::from_micro_ccd(100)
        );
        claim_eq!(state.unit_price, Amount::zero());

        claim_eq!(
            state.set_price(Amount::from_micro_ccd(u64::MAX)),
            Amount::zero()
        );
        claim_eq!(state.unit_price, Amount::from_micro_ccd(u64::MAX));
    }

    #[concordium_test]
    fn test_is_creator() {
        let state = state();

        claim!(state.is_creator(&Address::Account(CREATOR)));
        claim!(!state.is_creator(&Address::Account(USER)));
        claim!(!state.is_creator(&LISTING));
    }

    #[concordium_test]
    fn test_check_opt_in_valid() {
        let result = state().check_opt_in(
            &Address::Account(CREATOR),
            &LISTING,
            &payment(LISTING, reserve()),
            || Ok(false),
        );

        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_check_opt_in_not_creator() {
        let result = state().check_opt_in(
            &Address::Account(USER),
            &LISTING,
            &payment(LISTING, reserve()),
            || panic!("Registration must not be queried for unauthorized sender"),
        );

        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
    }

    #[concordium_test]
    fn test_check_opt_in_already_registered() {
        let result = state().check_opt_in(
            &Address::Account(CREATOR),
            &LISTING,
            &payment(LISTING, reserve()),
            || Ok(true),
        );

        claim_eq!(result, Err(CustomContractError::AlreadyRegistered.into()));
    }

    #[concordium_test]
    fn test_check_opt_in_registration_query_fails() {
        let result = state().check_opt_in(
            &Address::Account(CREATOR),
            &LISTING,
            &payment(LISTING, reserve()),
            || Err(CustomContractError::InvokeContractError.into()),
        );

        claim_eq!(
            result,
            Err(CustomContractError::InvokeContractError.into())
        );
    }

    #[concordium_test]
    fn test_check_opt_in_wrong_receiver() {
        let result = state().check_opt_in(
            &Address::Account(CREATOR),
            &LISTING,
            &payment(Address::Account(CREATOR), reserve()),
            || Ok(false),
        );

        claim_eq!(result, Err(CustomContractError::PaymentMismatch.into()));
    }

    #[concordium_test]
    fn test_check_opt_in_amount_off_by_one() {
        let state = state();
        let under = Amount::from_micro_ccd(reserve().micro_ccd - 1);
        let over = Amount::from_micro_ccd(reserve().micro_ccd + 1);

        for amount in [under, over, Amount::zero()] {
            let result = state.check_opt_in(
                &Address::Account(CREATOR),
                &LISTING,
                &payment(LISTING, amount),
                || Ok(false),
            );

            claim_eq!(result, Err(CustomContractError::PaymentMismatch.into()));
        }
    }

    #[concordium_test]
    fn test_view() {
        let state = state();

        claim_eq!(
            state.view(),
            ListingView {
                creator: CREATOR,
                asset: state.asset,
                unit_price: Amount::from_micro_ccd(100),
            }
        );
    }
}
