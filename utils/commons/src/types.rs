use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Asset identifier inside the asset ledger.
pub type AssetTokenId = TokenIdU64;

/// Asset amount type. Only zero amounts are ever sent by the listing.
pub type AssetTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type AssetTransferParams = TransferParams<AssetTokenId, AssetTokenAmount>;

pub type AssetOnReceivingParams = OnReceivingCis2Params<AssetTokenId, AssetTokenAmount>;
