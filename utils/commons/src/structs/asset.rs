use super::*;

/// A fungible asset, globally identified by the asset ledger contract hosting
/// it together with its token id.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Address of the asset ledger contract.
    pub contract: ContractAddress,
    /// Asset identifier within the asset ledger.
    pub id: AssetTokenId,
}

/// The parameter type for the asset ledger function `isOptedIn`.
#[derive(Debug, Serialize, SchemaType)]
pub struct OptInQueryParams {
    /// Asset to check the registration for.
    pub token_id: AssetTokenId,
    /// Address whose registration is checked.
    pub address: Address,
}
