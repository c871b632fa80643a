use super::*;

/// Address of this contract instance, the custodian of the listed units.
pub fn application_address(ctx: &impl HasReceiveContext) -> Address {
    Address::Contract(ctx.self_address())
}

/// Reserve an address has to pay to be registered for one more asset.
pub fn opt_in_reserve() -> Option<Amount> {
    MIN_BALANCE
        .micro_ccd
        .checked_add(ASSET_OPT_IN_MIN_BALANCE.micro_ccd)
        .map(Amount::from_micro_ccd)
}
