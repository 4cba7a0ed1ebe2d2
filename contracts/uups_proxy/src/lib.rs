#![no_std]

//! # UUPS proxy
//!
//! The long-lived identity of an upgradeable contract. The proxy owns all
//! persistent state and a reference to the active logic module; every
//! call other than the upgrade operations is forwarded to that module,
//! which runs against the proxy's own storage.
//!
//! Upgrades are self-authorizing: the proxy asks the *active* module
//! whether the caller may replace it. A module that drops or weakens that
//! check removes the protection for every later upgrade; the proxy does
//! not keep an independent gate.

use logic_modules::{registry, Call, Context, LogicModule, Reply};
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, BytesN, Env, Vec};
use upgradeability::{
    ensure_upgradeable, events as proxy_events, implementation_slot, record_upgrade, stage,
    storage, ProxyConfig, ProxyError, UpgradeHistory,
};


contractmeta!(
    key = "Description",
    val = "UUPS proxy: a stable identity over replaceable logic modules"
);

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contract]
pub struct UupsProxy;

#[contractimpl]
impl UupsProxy {
    // ========================================================================
    // Identity
    // ========================================================================

    /// Establish the proxy over `implementation` and optionally run an
    /// initializer against it in the same transaction.
    pub fn deploy(
        env: Env,
        deployer: Address,
        implementation: BytesN<32>,
        config: ProxyConfig,
        init: Option<Call>,
    ) -> Result<Reply, ProxyError> {
        deployer.require_auth();
        if storage::get_implementation(&env).is_some() {
            return Err(ProxyError::AlreadyDeployed);
        }

        let module = Self::resolve_target(&env, &implementation)?;
        storage::set_config(&env, &config);
        Self::install(&env, &implementation, module);
        Self::bump(&env);

        match init {
            Some(call) => {
                let ctx = Context::authenticated(&env, &deployer, &config);
                module.dispatch(&ctx, call)
            }
            None => Ok(Reply::Unit),
        }
    }

    // ========================================================================
    // Forwarding
    // ========================================================================

    /// Fallback path: run `call` on the active module with the proxy's
    /// storage, returning its reply or error unchanged.
    pub fn forward(env: Env, caller: Address, call: Call) -> Result<Reply, ProxyError> {
        let module = Self::active(&env)?;
        let config = Self::load_config(&env);
        Self::bump(&env);
        module.dispatch(&Context::new(&env, &caller, &config), call)
    }

    // ========================================================================
    // Upgrades
    // ========================================================================

    pub fn upgrade_to(
        env: Env,
        caller: Address,
        new_implementation: BytesN<32>,
    ) -> Result<(), ProxyError> {
        let config = Self::load_config(&env);
        Self::swap(&Context::new(&env, &caller, &config), &new_implementation)?;
        Ok(())
    }

    /// Upgrade and run `call` against the new module as one unit. If the
    /// call fails the whole invocation fails with `UpgradeRolledBack` and
    /// the host discards the swap along with every other write. The gate
    /// and the call share one context, so the caller is authenticated once.
    pub fn upgrade_to_and_call(
        env: Env,
        caller: Address,
        new_implementation: BytesN<32>,
        call: Call,
    ) -> Result<Reply, ProxyError> {
        let config = Self::load_config(&env);
        let ctx = Context::new(&env, &caller, &config);
        let module = Self::swap(&ctx, &new_implementation)?;
        module.dispatch(&ctx, call).map_err(|err| {
            log!(
                &env,
                "post-upgrade call failed, reverting upgrade",
                new_implementation,
                err as u32
            );
            ProxyError::UpgradeRolledBack
        })
    }

    /// Permanently disable upgrades. Authorized by the active module, the
    /// same way an upgrade would be.
    pub fn freeze_upgrades(env: Env, caller: Address) -> Result<(), ProxyError> {
        let module = Self::active(&env)?;
        ensure_upgradeable(&env)?;
        let config = Self::load_config(&env);
        module.authorize_upgrade(&Context::new(&env, &caller, &config))?;
        storage::freeze(&env);
        proxy_events::upgrades_frozen(&env, &caller);
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn implementation(env: Env) -> Option<BytesN<32>> {
        storage::get_implementation(&env)
    }

    pub fn initialized_stage(env: Env) -> u32 {
        stage::initialized_stage(&env)
    }

    pub fn config(env: Env) -> Option<ProxyConfig> {
        storage::get_config(&env)
    }

    pub fn is_frozen(env: Env) -> bool {
        storage::is_frozen(&env)
    }

    pub fn upgrade_history(env: Env) -> Vec<UpgradeHistory> {
        storage::get_history(&env)
    }
}

impl UupsProxy {
    fn active(env: &Env) -> Result<&'static dyn LogicModule, ProxyError> {
        let implementation = storage::get_implementation(env).ok_or(ProxyError::NotDeployed)?;
        registry::resolve(&implementation)
    }

    fn load_config(env: &Env) -> ProxyConfig {
        storage::get_config(env).unwrap_or_default()
    }

    fn resolve_target(
        env: &Env,
        implementation: &BytesN<32>,
    ) -> Result<&'static dyn LogicModule, ProxyError> {
        let module = registry::resolve(implementation)?;
        if module.proxiable_uuid(env) != Some(implementation_slot(env)) {
            return Err(ProxyError::NotProxiable);
        }
        Ok(module)
    }

    fn install(env: &Env, implementation: &BytesN<32>, module: &dyn LogicModule) {
        storage::set_implementation(env, implementation);
        record_upgrade(env, implementation, module.version(env));
        proxy_events::upgraded(env, implementation);
    }

    /// Authorize through the active module, then point the proxy at
    /// `new_implementation`.
    fn swap(
        ctx: &Context,
        new_implementation: &BytesN<32>,
    ) -> Result<&'static dyn LogicModule, ProxyError> {
        let env = ctx.env;
        let active = Self::active(env)?;
        ensure_upgradeable(env)?;

        if let Err(err) = active.authorize_upgrade(ctx) {
            log!(env, "upgrade rejected", ctx.caller.clone(), err as u32);
            return Err(err);
        }

        let next = Self::resolve_target(env, new_implementation)?;
        Self::install(env, new_implementation, next);
        Self::bump(env);
        Ok(next)
    }

    fn bump(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }
}
