#![no_std]

//! Shared primitives of the UUPS upgrade protocol: the storage layout
//! registry, layout-restricted slot views, the stage-initializer guard and
//! the controller's reserved storage.

use soroban_sdk::{contracttype, Address, BytesN, Env, String};

pub mod errors;
pub mod events;
pub mod layout;
pub mod slots;
pub mod stage;

pub use errors::ProxyError;
pub use layout::Slot;
pub use slots::{SlotSet, SlotSnapshot};


/// ERC-1967 implementation slot. A module is a valid upgrade target only
/// if its `proxiable_uuid` reports this value.
pub const IMPLEMENTATION_SLOT: [u8; 32] = [
    0x36, 0x08, 0x94, 0xa1, 0x3b, 0xa1, 0xa3, 0x21, 0x06, 0x67, 0xc8, 0x28, 0x49, 0x2d, 0xb9, 0x8d,
    0xca, 0x3e, 0x20, 0x76, 0xcc, 0x37, 0x35, 0xa9, 0x20, 0xa3, 0xca, 0x50, 0x5d, 0x38, 0x2b, 0xbc,
];

pub fn implementation_slot(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &IMPLEMENTATION_SLOT)
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UpgradeHistory {
    pub implementation: BytesN<32>,
    pub version: String,
    pub stage: u32,
    pub upgraded_at: u64,
}

/// Who may call the mutating payload operations (`set_value`, `set_name`,
/// `increment_count`, `batch_update`). Upgrades and ownership transfer are
/// always owner-only.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum MutationPolicy {
    Open = 0,
    OwnerOnly = 1,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ProxyConfig {
    pub mutation_policy: MutationPolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mutation_policy: MutationPolicy::Open,
        }
    }
}

/// Controller-reserved storage. These keys live outside the slot
/// registry so no logic layout can ever overlap them.
pub mod storage {
    use super::*;
    use soroban_sdk::Vec;

    #[contracttype]
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum ControllerKey {
        Implementation,
        InitializedStage,
        Config,
        Frozen,
        History,
    }

    pub fn get_implementation(env: &Env) -> Option<BytesN<32>> {
        env.storage().instance().get(&ControllerKey::Implementation)
    }

    pub fn set_implementation(env: &Env, implementation: &BytesN<32>) {
        env.storage()
            .instance()
            .set(&ControllerKey::Implementation, implementation);
    }

    pub fn get_initialized_stage(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&ControllerKey::InitializedStage)
            .unwrap_or(0)
    }

    pub(crate) fn set_initialized_stage(env: &Env, stage: u32) {
        env.storage()
            .instance()
            .set(&ControllerKey::InitializedStage, &stage);
    }

    pub fn get_config(env: &Env) -> Option<ProxyConfig> {
        env.storage().instance().get(&ControllerKey::Config)
    }

    pub fn set_config(env: &Env, config: &ProxyConfig) {
        env.storage().instance().set(&ControllerKey::Config, config);
    }

    pub fn is_frozen(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&ControllerKey::Frozen)
            .unwrap_or(false)
    }

    pub fn freeze(env: &Env) {
        env.storage().instance().set(&ControllerKey::Frozen, &true);
    }

    pub fn add_history(env: &Env, history: UpgradeHistory) {
        let mut list = get_history(env);
        list.push_back(history);
        env.storage()
            .persistent()
            .set(&ControllerKey::History, &list);
    }

    pub fn get_history(env: &Env) -> Vec<UpgradeHistory> {
        env.storage()
            .persistent()
            .get(&ControllerKey::History)
            .unwrap_or(Vec::new(env))
    }
}

/// Checks that `caller` is the current owner. Fails with `Unauthorized`
/// when no owner exists yet.
///
/// Pure comparison: authenticating `caller` is left to the invocation
/// context, which must do it at most once per frame.
pub fn ensure_owner(slots: &SlotSet, caller: &Address) -> Result<Address, ProxyError> {
    let owner = slots.require_owner()?;
    if *caller != owner {
        return Err(ProxyError::Unauthorized);
    }
    Ok(owner)
}

impl MutationPolicy {
    pub fn requires_owner(self) -> bool {
        matches!(self, MutationPolicy::OwnerOnly)
    }
}

pub fn ensure_upgradeable(env: &Env) -> Result<(), ProxyError> {
    if storage::is_frozen(env) {
        return Err(ProxyError::UpgradesFrozen);
    }
    Ok(())
}

/// Appends an entry to the upgrade history for the implementation that was
/// just installed.
pub fn record_upgrade(env: &Env, implementation: &BytesN<32>, version: String) {
    storage::add_history(
        env,
        UpgradeHistory {
            implementation: implementation.clone(),
            version,
            stage: stage::initialized_stage(env),
            upgraded_at: env.ledger().timestamp(),
        },
    );
}
