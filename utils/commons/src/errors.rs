use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Sender is not the creator of the listing (Error code: -4).
    Unauthorized,
    /// Address is already registered for the asset (Error code: -5).
    AlreadyRegistered,
    /// Accompanying payment has a wrong receiver or amount (Error code: -6).
    PaymentMismatch,
    /// Asset ledger refused the transfer (Error code: -7).
    AssetTransferRejected,
    /// Failed to invoke a contract (Error code: -8).
    InvokeContractError,
    /// Incompatible contract (Error code: -9)
    Incompatible,
    /// Unsupported (Error code: -10)
    Unsupported,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Failure of a read-only query to another contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(cre: ContractReadError<R>) -> Self {
        match cre {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
