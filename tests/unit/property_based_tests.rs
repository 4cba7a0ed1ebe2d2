/// Property-based checks over random operation sequences
use crate::utils::constants::RENAMES;
use crate::utils::*;
use logic_modules::registry::v2_hash;
use logic_modules::testutils::partial_hash;
use logic_modules::Call;
use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use upgradeability::{MutationPolicy, ProxyConfig, ProxyError};

#[derive(Clone, Debug)]
enum Op {
    SetValue(u128),
    SetName(usize),
    Increment,
    Batch(u128, usize),
    StrangerBatch(u128, usize),
    InitializeV1,
    InitializeV2,
    Upgrade,
    UpgradeAndInit,
    UpgradeAndSet(u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let name = 0..RENAMES.len();
    prop_oneof![
        any::<u128>().prop_map(Op::SetValue),
        name.clone().prop_map(Op::SetName),
        Just(Op::Increment),
        (any::<u128>(), name.clone()).prop_map(|(v, n)| Op::Batch(v, n)),
        (any::<u128>(), name).prop_map(|(v, n)| Op::StrangerBatch(v, n)),
        Just(Op::InitializeV1),
        Just(Op::InitializeV2),
        Just(Op::Upgrade),
        Just(Op::UpgradeAndInit),
        any::<u128>().prop_map(Op::UpgradeAndSet),
    ]
}

fn rename(env: &Env, idx: usize) -> soroban_sdk::String {
    soroban_sdk::String::from_str(env, RENAMES[idx])
}

/// Apply `op`, discarding the outcome; properties are checked on the
/// observable state afterwards.
fn apply(
    env: &Env,
    proxy: &uups_proxy::UupsProxyClient,
    owner: &Address,
    stranger: &Address,
    op: &Op,
) {
    let _ = match op {
        Op::SetValue(v) => proxy.try_forward(owner, &Call::SetValue(*v)).map(|_| ()),
        Op::SetName(n) => proxy
            .try_forward(owner, &Call::SetName(rename(env, *n)))
            .map(|_| ()),
        Op::Increment => proxy.try_forward(owner, &Call::IncrementCount).map(|_| ()),
        Op::Batch(v, n) => proxy
            .try_forward(owner, &Call::BatchUpdate(*v, rename(env, *n)))
            .map(|_| ()),
        Op::StrangerBatch(v, n) => proxy
            .try_forward(stranger, &Call::BatchUpdate(*v, rename(env, *n)))
            .map(|_| ()),
        Op::InitializeV1 => proxy
            .try_forward(owner, &Call::Initialize(stranger.clone()))
            .map(|_| ()),
        Op::InitializeV2 => proxy.try_forward(owner, &Call::InitializeV2).map(|_| ()),
        Op::Upgrade => proxy.try_upgrade_to(owner, &v2_hash(env)).map(|_| ()),
        Op::UpgradeAndInit => proxy
            .try_upgrade_to_and_call(owner, &v2_hash(env), &Call::InitializeV2)
            .map(|_| ()),
        Op::UpgradeAndSet(v) => proxy
            .try_upgrade_to_and_call(owner, &v2_hash(env), &Call::SetValue(*v))
            .map(|_| ()),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stage_never_decreases_and_reinit_changes_nothing(
        ops in proptest::collection::vec(op_strategy(), 1..12)
    ) {
        let env = Env::default();
        env.mock_all_auths();
        let (proxy, owner) = deploy_v1_with(&env, ProxyConfig {
            mutation_policy: MutationPolicy::OwnerOnly,
        });
        let stranger = Address::generate(&env);

        let mut stage = proxy.initialized_stage();
        prop_assert_eq!(stage, 1);
        for op in &ops {
            apply(&env, &proxy, &owner, &stranger, op);
            let now = proxy.initialized_stage();
            prop_assert!(now >= stage);
            prop_assert!(now <= 2);
            stage = now;
        }

        let before = observe(&env, &proxy);
        let err = expect_proxy_error(proxy.try_forward(&owner, &Call::Initialize(stranger.clone())));
        prop_assert_eq!(err, ProxyError::AlreadyInitialized);
        prop_assert_eq!(observe(&env, &proxy), before);
    }

    #[test]
    fn upgrade_preserves_existing_fields(value in any::<u128>(), n in 0..RENAMES.len()) {
        let env = Env::default();
        env.mock_all_auths();
        let (proxy, owner) = deploy_v1(&env);
        proxy.forward(&owner, &Call::SetValue(value));
        proxy.forward(&owner, &Call::SetName(rename(&env, n)));
        let before = observe(&env, &proxy);

        upgrade_to_v2(&env, &proxy, &owner);
        let after = observe(&env, &proxy);

        prop_assert_eq!(after.slots.owner, before.slots.owner);
        prop_assert_eq!(after.slots.value, value);
        prop_assert_eq!(after.slots.name, rename(&env, n));
        prop_assert_eq!(after.slots.count, 0);
        prop_assert_eq!(after.stage, 2);
    }

    #[test]
    fn batch_update_is_all_or_nothing(
        seed in any::<u128>(),
        value in any::<u128>(),
        n in 0..RENAMES.len(),
    ) {
        let env = Env::default();
        env.mock_all_auths();
        let (proxy, owner) = deploy_v1_with(&env, ProxyConfig {
            mutation_policy: MutationPolicy::OwnerOnly,
        });
        upgrade_to_v2(&env, &proxy, &owner);
        proxy.forward(&owner, &Call::SetValue(seed));
        let stranger = Address::generate(&env);
        let before = observe(&env, &proxy);

        let err = expect_proxy_error(
            proxy.try_forward(&stranger, &Call::BatchUpdate(value, rename(&env, n))),
        );
        prop_assert_eq!(err, ProxyError::Unauthorized);
        prop_assert_eq!(observe(&env, &proxy), before.clone());

        proxy.forward(&owner, &Call::BatchUpdate(value, rename(&env, n)));
        let after = observe(&env, &proxy);
        prop_assert_eq!(after.slots.value, value);
        prop_assert_eq!(after.slots.name, rename(&env, n));
        prop_assert_eq!(after.slots.count, before.slots.count);
    }

    #[test]
    fn batch_failing_midway_changes_nothing(
        seed in any::<u128>(),
        value in any::<u128>(),
        n in 0..RENAMES.len(),
    ) {
        let env = Env::default();
        env.mock_all_auths();
        let (proxy, owner) = deploy_v1(&env);
        proxy.forward(&owner, &Call::SetValue(seed));
        // this module cannot see `name`, so the batch fails on its second write
        proxy.upgrade_to(&owner, &partial_hash(&env));
        let before = observe(&env, &proxy);

        let err = expect_proxy_error(
            proxy.try_forward(&owner, &Call::BatchUpdate(value, rename(&env, n))),
        );
        prop_assert_eq!(err, ProxyError::LayoutViolation);
        let after = observe(&env, &proxy);
        prop_assert_eq!(after.slots.value, seed);
        prop_assert_eq!(after, before);
    }
}
