use super::*;

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account that created the listing.
    pub creator: AccountAddress,
    /// Listed asset, fixed for the lifetime of the instance.
    pub asset: Asset,
    /// Price of one unit of the asset.
    pub unit_price: Amount,
    pub phantom_data: PhantomData<S>,
}

/// The parameter type for the contract init function.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreateParams {
    /// Asset to list.
    pub asset: Asset,
    /// Initial price of one unit.
    pub unit_price: Amount,
}

/// Payment funding the contract's registration with the asset ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbrPayment {
    pub receiver: Address,
    pub amount: Amount,
}

/// Return type of the `view` function.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ListingView {
    pub creator: AccountAddress,
    pub asset: Asset,
    pub unit_price: Amount,
}
