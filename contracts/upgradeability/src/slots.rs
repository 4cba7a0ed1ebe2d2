//! Layout-restricted view over the proxy's logic slots.

use soroban_sdk::{contracttype, Address, Env, IntoVal, String, TryFromVal, Val};

use crate::layout::Slot;
use crate::ProxyError;

/// Handle a logic module receives for the duration of one call. It can
/// only read and write the slots of the layout it was built with.
#[derive(Clone)]
pub struct SlotSet<'a> {
    env: &'a Env,
    layout: &'static [Slot],
}

/// Point-in-time copy of every logic slot, unset slots zero-valued.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SlotSnapshot {
    pub owner: Option<Address>,
    pub value: u128,
    pub name: String,
    pub count: u64,
}

impl<'a> SlotSet<'a> {
    pub fn new(env: &'a Env, layout: &'static [Slot]) -> Self {
        Self { env, layout }
    }

    pub fn env(&self) -> &'a Env {
        self.env
    }

    pub fn layout(&self) -> &'static [Slot] {
        self.layout
    }

    fn ensure_visible(&self, slot: Slot) -> Result<(), ProxyError> {
        if self.layout.contains(&slot) {
            Ok(())
        } else {
            Err(ProxyError::LayoutViolation)
        }
    }

    pub fn read<V>(&self, slot: Slot) -> Result<Option<V>, ProxyError>
    where
        V: TryFromVal<Env, Val>,
    {
        self.ensure_visible(slot)?;
        Ok(self.env.storage().instance().get(&slot))
    }

    pub fn write<V>(&self, slot: Slot, value: &V) -> Result<(), ProxyError>
    where
        V: IntoVal<Env, Val>,
    {
        self.ensure_visible(slot)?;
        self.env.storage().instance().set(&slot, value);
        Ok(())
    }

    pub fn owner(&self) -> Result<Option<Address>, ProxyError> {
        self.read(Slot::Owner)
    }

    /// Owner of the proxy; fails when stage 1 has not set one yet.
    pub fn require_owner(&self) -> Result<Address, ProxyError> {
        self.owner()?.ok_or(ProxyError::Unauthorized)
    }

    pub fn value(&self) -> Result<u128, ProxyError> {
        Ok(self.read(Slot::Value)?.unwrap_or(0))
    }

    pub fn name(&self) -> Result<String, ProxyError> {
        Ok(self
            .read(Slot::Name)?
            .unwrap_or_else(|| String::from_str(self.env, "")))
    }

    pub fn count(&self) -> Result<u64, ProxyError> {
        Ok(self.read(Slot::Count)?.unwrap_or(0))
    }

    /// Reads every slot straight from storage, bypassing the layout
    /// restriction. Meant for the controller and for tests, never handed
    /// to a module.
    pub fn snapshot(env: &Env) -> SlotSnapshot {
        let storage = env.storage().instance();
        SlotSnapshot {
            owner: storage.get(&Slot::Owner),
            value: storage.get(&Slot::Value).unwrap_or(0),
            name: storage
                .get(&Slot::Name)
                .unwrap_or_else(|| String::from_str(env, "")),
            count: storage.get(&Slot::Count).unwrap_or(0),
        }
    }
}
