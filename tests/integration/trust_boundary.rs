//! Upgrade authorization lives in the replaceable module, not in the
//! proxy. These tests pin that boundary from both sides.

use crate::utils::*;
use logic_modules::registry::{resolve, RELEASED};
use logic_modules::testutils::ungated_hash;
use logic_modules::Call;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, BytesN, Env};
use upgradeability::layout::{is_append_only, is_prefix_compatible};
use upgradeability::ProxyError;

#[test]
fn every_released_module_keeps_the_upgrade_gate() {
    for raw in RELEASED {
        let env = Env::default();
        env.mock_all_auths();
        let (proxy, owner) = deploy_v1(&env);
        let target = BytesN::from_array(&env, raw);

        // make the module under test the active one
        proxy.upgrade_to(&owner, &target);
        let before = observe(&env, &proxy);

        let stranger = Address::generate(&env);
        for next in RELEASED {
            let next = BytesN::from_array(&env, next);
            assert_eq!(
                expect_proxy_error(proxy.try_upgrade_to(&stranger, &next)),
                ProxyError::Unauthorized
            );
        }
        assert_eq!(
            expect_proxy_error(proxy.try_freeze_upgrades(&stranger)),
            ProxyError::Unauthorized
        );
        assert_eq!(observe(&env, &proxy), before);
        assert!(resolve(&target).is_ok());
    }
}

#[test]
fn module_without_gate_exposes_the_proxy() {
    let env = Env::default();
    env.mock_all_auths();
    let (proxy, owner) = deploy_v1(&env);
    upgrade_to_v2(&env, &proxy, &owner);
    proxy.forward(&owner, &Call::IncrementCount);

    proxy.upgrade_to(&owner, &ungated_hash(&env));

    // once the active module drops the check, anyone can redirect the
    // proxy; the state itself is untouched by the takeover
    let attacker = Address::generate(&env);
    let target = proxy.implementation().unwrap();
    proxy.upgrade_to(&attacker, &target);
    assert_eq!(count(&proxy, &owner), 1);
    assert_eq!(proxy.upgrade_history().len(), 4);
}

#[test]
fn freezing_survives_later_modules() {
    let env = Env::default();
    env.mock_all_auths();
    let (proxy, owner) = deploy_v1(&env);
    proxy.upgrade_to(&owner, &ungated_hash(&env));
    proxy.freeze_upgrades(&owner);

    // the frozen flag is controller state, so even an ungated module
    // cannot be replaced any more
    let attacker = Address::generate(&env);
    let target = proxy.implementation().unwrap();
    assert_eq!(
        expect_proxy_error(proxy.try_upgrade_to(&attacker, &target)),
        ProxyError::UpgradesFrozen
    );
}

#[test]
fn released_layouts_only_append() {
    let env = Env::default();
    let layouts: Vec<_> = RELEASED
        .iter()
        .map(|raw| resolve(&BytesN::from_array(&env, raw)).unwrap().layout())
        .collect();

    for layout in &layouts {
        assert!(is_append_only(layout));
    }
    for pair in layouts.windows(2) {
        assert!(is_prefix_compatible(pair[0], pair[1]));
        assert!(!is_prefix_compatible(pair[1], pair[0]));
    }
}
