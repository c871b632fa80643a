use concordium_std::Amount;

/// Tag for the Custom Created event.
pub const CREATED_TAG: u8 = u8::MAX - 8;

/// Tag for the Custom Update Price event.
pub const UPDATE_PRICE_TAG: u8 = u8::MAX - 15;

/// Tag for the Custom Opt In event.
pub const OPT_IN_TAG: u8 = u8::MAX - 23;

/// Minimum balance any address must keep on the asset ledger (0.1 CCD).
pub const MIN_BALANCE: Amount = Amount { micro_ccd: 100_000 };

/// Additional reserve for every asset an address is registered for (0.1 CCD).
pub const ASSET_OPT_IN_MIN_BALANCE: Amount = Amount { micro_ccd: 100_000 };

/// Entrypoint invoked on contract receivers of CIS-2 transfers.
pub const ON_RECEIVING_CIS2: &str = "onReceivingCIS2";
