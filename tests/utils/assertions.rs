/// Assertion helpers for proxy results and emitted events
use core::fmt::Debug;
use soroban_sdk::testutils::Events;
use soroban_sdk::{Address, Env, InvokeError, IntoVal, Symbol, Val};
use upgradeability::ProxyError;

/// Unwrap the contract error out of a `try_*` client result
pub fn expect_proxy_error<T: Debug, C: Debug>(
    res: Result<Result<T, C>, Result<ProxyError, InvokeError>>,
) -> ProxyError {
    match res {
        Err(Ok(err)) => err,
        other => panic!("expected a contract error, got {:?}", other),
    }
}

/// Assert the most recent event was published by `emitter` under a single
/// `topic` with `data` as payload
pub fn assert_last_event<D: IntoVal<Env, Val>>(env: &Env, emitter: &Address, topic: Symbol, data: D) {
    let (contract, topics, payload) = env
        .events()
        .all()
        .last()
        .expect("no events were published");
    assert_eq!(&contract, emitter);
    assert_eq!(topics, (topic,).into_val(env));
    let expected: Val = data.into_val(env);
    assert_eq!(payload.get_payload(), expected.get_payload());
}
