#![no_std]

//! Governance owner for UUPS proxies. Upgrades are proposed, collect
//! validator approvals and can only execute after a timelock. The manager
//! must hold ownership of the target proxy; it calls the proxy's upgrade
//! operations as itself.

use logic_modules::{Call, Reply};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, BytesN, Env,
    Symbol, Vec,
};
use upgradeability::ProxyError;


#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ManagerError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    NotValidator = 4,
    ProposalNotFound = 5,
    AlreadyApproved = 6,
    InvalidState = 7,
    TimelockActive = 8,
    InsufficientApprovals = 9,
    UpgradeFailed = 10,
    InvalidConfig = 11,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UpgradeProposal {
    pub target: Address,
    pub new_implementation: BytesN<32>,
    pub call: Option<Call>,
    pub description: Symbol,
    pub proposer: Address,
    pub created_at: u64,
    pub executable_at: u64,
    pub executed: bool,
    pub canceled: bool,
    pub approvals: Vec<Address>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Config {
    pub admin: Address,
    pub min_delay: u64,
    pub required_approvals: u32,
    pub validators: Vec<Address>,
}

#[contracttype]
pub enum DataKey {
    Config,
    NextId,
    Proposal(u64),
}

// Upgrade surface of the proxy the manager governs.
#[soroban_sdk::contractclient(name = "ProxyClient")]
pub trait UpgradeableProxy {
    fn upgrade_to(
        env: Env,
        caller: Address,
        new_implementation: BytesN<32>,
    ) -> Result<(), ProxyError>;

    fn upgrade_to_and_call(
        env: Env,
        caller: Address,
        new_implementation: BytesN<32>,
        call: Call,
    ) -> Result<Reply, ProxyError>;
}

#[contract]
pub struct UpgradeManager;

#[contractimpl]
impl UpgradeManager {
    pub fn initialize(
        env: Env,
        admin: Address,
        validators: Vec<Address>,
        min_delay: u64,
        required_approvals: u32,
    ) -> Result<(), ManagerError> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Config) {
            return Err(ManagerError::AlreadyInitialized);
        }
        if required_approvals == 0 || required_approvals > validators.len() {
            return Err(ManagerError::InvalidConfig);
        }

        let config = Config {
            admin,
            min_delay,
            required_approvals,
            validators,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        Ok(())
    }

    pub fn propose_upgrade(
        env: Env,
        proposer: Address,
        target: Address,
        new_implementation: BytesN<32>,
        call: Option<Call>,
        description: Symbol,
    ) -> Result<u64, ManagerError> {
        proposer.require_auth();
        let config = Self::config(&env)?;
        if proposer != config.admin && !config.validators.contains(&proposer) {
            return Err(ManagerError::NotAuthorized);
        }

        let id: u64 = env.storage().instance().get(&DataKey::NextId).unwrap_or(0);
        let now = env.ledger().timestamp();
        let proposal = UpgradeProposal {
            target,
            new_implementation,
            call,
            description,
            proposer: proposer.clone(),
            created_at: now,
            executable_at: now.saturating_add(config.min_delay),
            executed: false,
            canceled: false,
            approvals: Vec::new(&env),
        };

        env.storage()
            .persistent()
            .set(&DataKey::Proposal(id), &proposal);
        env.storage().instance().set(&DataKey::NextId, &(id + 1));

        env.events()
            .publish((symbol_short!("proposed"), id), proposer);
        Ok(id)
    }

    pub fn approve(env: Env, validator: Address, proposal_id: u64) -> Result<(), ManagerError> {
        validator.require_auth();
        let config = Self::config(&env)?;
        if !config.validators.contains(&validator) {
            return Err(ManagerError::NotValidator);
        }

        let mut proposal = Self::proposal(&env, proposal_id)?;
        if proposal.executed || proposal.canceled {
            return Err(ManagerError::InvalidState);
        }
        if proposal.approvals.contains(&validator) {
            return Err(ManagerError::AlreadyApproved);
        }

        proposal.approvals.push_back(validator.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Proposal(proposal_id), &proposal);

        env.events()
            .publish((symbol_short!("approved"), proposal_id), validator);
        Ok(())
    }

    pub fn cancel(env: Env, admin: Address, proposal_id: u64) -> Result<(), ManagerError> {
        admin.require_auth();
        let config = Self::config(&env)?;
        if admin != config.admin {
            return Err(ManagerError::NotAuthorized);
        }

        let mut proposal = Self::proposal(&env, proposal_id)?;
        if proposal.executed || proposal.canceled {
            return Err(ManagerError::InvalidState);
        }
        proposal.canceled = true;
        env.storage()
            .persistent()
            .set(&DataKey::Proposal(proposal_id), &proposal);

        env.events()
            .publish((symbol_short!("canceled"), proposal_id), ());
        Ok(())
    }

    pub fn execute(env: Env, proposal_id: u64) -> Result<(), ManagerError> {
        let config = Self::config(&env)?;
        let mut proposal = Self::proposal(&env, proposal_id)?;

        if proposal.executed || proposal.canceled {
            return Err(ManagerError::InvalidState);
        }
        if env.ledger().timestamp() < proposal.executable_at {
            return Err(ManagerError::TimelockActive);
        }
        if proposal.approvals.len() < config.required_approvals {
            return Err(ManagerError::InsufficientApprovals);
        }

        let proxy = ProxyClient::new(&env, &proposal.target);
        let manager = env.current_contract_address();
        let upgraded = match proposal.call.clone() {
            Some(call) => proxy
                .try_upgrade_to_and_call(&manager, &proposal.new_implementation, &call)
                .map(|_| ()),
            None => proxy
                .try_upgrade_to(&manager, &proposal.new_implementation)
                .map(|_| ()),
        };
        if upgraded.is_err() {
            return Err(ManagerError::UpgradeFailed);
        }

        proposal.executed = true;
        env.storage()
            .persistent()
            .set(&DataKey::Proposal(proposal_id), &proposal);

        env.events()
            .publish((symbol_short!("executed"), proposal_id), ());
        Ok(())
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<UpgradeProposal, ManagerError> {
        Self::proposal(&env, proposal_id)
    }

    pub fn get_config(env: Env) -> Result<Config, ManagerError> {
        Self::config(&env)
    }
}

impl UpgradeManager {
    fn config(env: &Env) -> Result<Config, ManagerError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ManagerError::NotInitialized)
    }

    fn proposal(env: &Env, proposal_id: u64) -> Result<UpgradeProposal, ManagerError> {
        env.storage()
            .persistent()
            .get(&DataKey::Proposal(proposal_id))
            .ok_or(ManagerError::ProposalNotFound)
    }
}
