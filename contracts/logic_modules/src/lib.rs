#![no_std]

//! # Logic modules
//!
//! Replaceable code units executed on behalf of a UUPS proxy. A module
//! never owns storage: the proxy hands it a [`Context`] for the current
//! call and the module reads and writes the proxy's slots through a
//! [`SlotSet`] restricted to the module's own layout.
//!
//! Modules are selected through the [`registry`], which maps a code hash
//! (the proxy's `implementation_ref`) to a `&'static dyn LogicModule`.

use core::cell::Cell;

use soroban_sdk::{contracttype, Address, BytesN, Env, String};
use upgradeability::{ensure_owner, ProxyConfig, ProxyError, Slot, SlotSet};

pub mod events;
pub mod registry;
pub mod v1;
pub mod v2;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use v1::LogicV1;
pub use v2::LogicV2;

/// Call payload forwarded by the proxy to the active module.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Call {
    Initialize(Address),
    InitializeV2,
    SetValue(u128),
    SetName(String),
    IncrementCount,
    BatchUpdate(u128, String),
    TransferOwnership(Address),
    GetValue,
    GetName,
    GetCount,
    GetValueAndCount,
    Version,
    Owner,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Reply {
    Unit,
    Value(u128),
    Name(String),
    Count(u64),
    ValueAndCount(u128, u64),
    Version(String),
    Owner(Option<Address>),
}

/// Execution context of one forwarded call: the proxy's environment, the
/// identity the host authenticated for the call and the proxy's policy.
///
/// The host accepts one `require_auth` per address and frame, so every
/// privileged step of an invocation (upgrade gate, coupled call) shares a
/// single context and authenticates the caller through it.
pub struct Context<'a> {
    pub env: &'a Env,
    pub caller: &'a Address,
    pub config: &'a ProxyConfig,
    authenticated: Cell<bool>,
}

impl<'a> Context<'a> {
    pub fn new(env: &'a Env, caller: &'a Address, config: &'a ProxyConfig) -> Self {
        Self {
            env,
            caller,
            config,
            authenticated: Cell::new(false),
        }
    }

    /// Context for a caller the entry point has already authenticated.
    pub fn authenticated(env: &'a Env, caller: &'a Address, config: &'a ProxyConfig) -> Self {
        Self {
            env,
            caller,
            config,
            authenticated: Cell::new(true),
        }
    }

    pub fn require_caller_auth(&self) {
        if !self.authenticated.get() {
            self.caller.require_auth();
            self.authenticated.set(true);
        }
    }

    /// Authenticates the caller and checks it owns the proxy.
    pub fn authorize_owner(&self, slots: &SlotSet) -> Result<Address, ProxyError> {
        self.require_caller_auth();
        ensure_owner(slots, self.caller)
    }

    /// Gate for the payload mutations, governed by the proxy's policy.
    pub fn authorize_mutation(&self, slots: &SlotSet) -> Result<(), ProxyError> {
        if self.config.mutation_policy.requires_owner() {
            self.authorize_owner(slots)?;
        }
        Ok(())
    }
}

pub trait LogicModule {
    fn version(&self, env: &Env) -> String;

    /// Registry prefix this module reads and writes.
    fn layout(&self) -> &'static [Slot];

    /// ERC-1822 marker; `None` for code that cannot act as a UUPS target.
    fn proxiable_uuid(&self, env: &Env) -> Option<BytesN<32>>;

    /// Gate run by the proxy before it swaps the implementation away from
    /// this module. The check travels with the module, so a module that
    /// weakens it weakens every later upgrade.
    fn authorize_upgrade(&self, ctx: &Context) -> Result<(), ProxyError>;

    fn dispatch(&self, ctx: &Context, call: Call) -> Result<Reply, ProxyError>;

    fn slots<'a>(&self, env: &'a Env) -> SlotSet<'a> {
        SlotSet::new(env, self.layout())
    }
}
