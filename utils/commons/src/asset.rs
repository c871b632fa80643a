use concordium_cis2::{AdditionalData, Receiver, Transfer, TransferParams};
use concordium_std::*;

use crate::{
    Asset, AssetTokenAmount, ContractReadError, OptInQueryParams, ON_RECEIVING_CIS2,
};

/// Calls into the asset ledger contract hosting a listed asset.
pub trait HostAssetExt<S>: HasHost<S> {
    /// Whether `address` is registered to hold units of `asset`.
    fn asset_is_opted_in(
        &self,
        asset: &Asset,
        address: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                &asset.contract,
                &OptInQueryParams {
                    token_id: asset.id,
                    address,
                },
                EntrypointName::new_unchecked("isOptedIn"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        bool::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }

    /// Registers `to` for `asset` with a zero unit transfer sent by `from`.
    fn asset_opt_in(
        &mut self,
        asset: &Asset,
        from: Address,
        to: Address,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let to = match to {
            Address::Account(account) => Receiver::Account(account),
            Address::Contract(contract) => Receiver::Contract(
                contract,
                OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into()),
            ),
        };
        let transfer = Transfer {
            token_id: asset.id,
            amount: AssetTokenAmount::from(0),
            from,
            to,
            data: AdditionalData::empty(),
        };

        self.invoke_contract(
            &asset.contract,
            &TransferParams(vec![transfer]),
            EntrypointName::new_unchecked("transfer"),
            Amount::zero(),
        )?;

        Ok(())
    }
}

impl<S, H: HasHost<S>> HostAssetExt<S> for H {}

#[concordium_cfg_test]
mod tests {
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    use super::*;
    use crate::{test::*, AssetTransferParams};

    const ASSET_LEDGER: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const LISTING: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const USER_1: AccountAddress = AccountAddress([1; 32]);

    fn asset() -> Asset {
        Asset {
            contract: ASSET_LEDGER,
            id: TokenIdU64(7),
        }
    }

    #[concordium_test]
    fn test_asset_is_opted_in() {
        let mut host = TestHost::new((), TestStateBuilder::new());

        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            parse_and_check_mock::<OptInQueryParams, _>(
                |params| {
                    params.token_id == TokenIdU64(7)
                        && params.address == Address::Contract(LISTING)
                },
                true,
            ),
        );

        let result = host.asset_is_opted_in(&asset(), Address::Contract(LISTING));

        claim!(matches!(result, Ok(true)));
    }

    #[concordium_test]
    fn test_asset_is_opted_in_rejected_query() {
        let mut host = TestHost::new((), TestStateBuilder::new());

        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            reject_mock(),
        );

        let result = host.asset_is_opted_in(&asset(), Address::Account(USER_1));

        claim!(matches!(result, Err(ContractReadError::Call(_))));
    }

    #[concordium_test]
    fn test_asset_is_opted_in_malformed_reply() {
        let mut host = TestHost::new((), TestStateBuilder::new());

        // Empty reply cannot be read as `bool`.
        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("isOptedIn".into()),
            parse_and_ok_mock::<OptInQueryParams, _>(()),
        );

        let result = host.asset_is_opted_in(&asset(), Address::Contract(LISTING));

        claim!(matches!(result, Err(ContractReadError::Parse)));
    }

    #[concordium_test]
    fn test_asset_opt_in_account() {
        let mut host = TestHost::new((), TestStateBuilder::new());

        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<AssetTransferParams, _>(
                |params| {
                    params.0.len() == 1
                        && params.0[0].amount == AssetTokenAmount::from(0)
                        && params.0[0].from == Address::Contract(LISTING)
                        && matches!(params.0[0].to, Receiver::Account(USER_1))
                },
                (),
            ),
        );

        let result = host.asset_opt_in(
            &asset(),
            Address::Contract(LISTING),
            Address::Account(USER_1),
        );

        claim!(result.is_ok());
    }

    #[concordium_test]
    fn test_asset_opt_in_contract() {
        let mut host = TestHost::new((), TestStateBuilder::new());

        host.setup_mock_entrypoint(
            ASSET_LEDGER,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<AssetTransferParams, _>(
                |params| match &params.0[0].to {
                    Receiver::Contract(address, entrypoint) => {
                        *address == LISTING
                            && entrypoint.as_entrypoint_name()
                                == EntrypointName::new_unchecked(ON_RECEIVING_CIS2)
                    }
                    _ => false,
                },
                (),
            ),
        );

        let result = host.asset_opt_in(
            &asset(),
            Address::Contract(LISTING),
            Address::Contract(LISTING),
        );

        claim!(result.is_ok());
    }
}
