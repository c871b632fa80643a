use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
pub use inner::*;

#[concordium_cfg_test]
mod inner {
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;

    pub fn parse_and_ok_mock<D: Deserial + 'static, S: 'static>(
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new_v1(move |parameter, _amount, _balance, _state| {
            D::deserial(&mut Cursor::new(parameter.as_ref()))
                .map_err(|_| CallContractError::Trap)?;
            Ok((false, return_value.clone()))
        })
    }

    pub fn parse_and_check_mock<D: Deserial + 'static, S: 'static>(
        check: impl Fn(&D) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new_v1(move |parameter, _, _, _state| {
            let value = D::deserial(&mut Cursor::new(parameter.as_ref()))
                .map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, return_value.clone()))
        })
    }

    /// Mock of an entrypoint that always rejects the call.
    pub fn reject_mock<S: 'static>() -> MockFn<S> {
        MockFn::new_v1(|_, _, _, _state| Err(CallContractError::<()>::Trap))
    }
}
