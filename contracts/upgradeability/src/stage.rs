use soroban_sdk::Env;

use crate::{events, storage, ProxyError};

/// Highest stage initializer that has completed on this proxy.
pub fn initialized_stage(env: &Env) -> u32 {
    storage::get_initialized_stage(env)
}

/// Runs `body` as the initializer for `stage`.
///
/// The marker is checked before `body` touches anything and advanced only
/// after it succeeds, so a stage runs at most once per proxy no matter how
/// many implementations come and go. The marker never moves backwards.
pub fn run_stage<F>(env: &Env, stage: u32, body: F) -> Result<(), ProxyError>
where
    F: FnOnce() -> Result<(), ProxyError>,
{
    if stage == 0 || initialized_stage(env) >= stage {
        return Err(ProxyError::AlreadyInitialized);
    }
    body()?;
    storage::set_initialized_stage(env, stage);
    events::initialized(env, stage);
    Ok(())
}
