use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn initialized(env: &Env, stage: u32) {
    env.events().publish((symbol_short!("init"),), stage);
}

pub fn upgraded(env: &Env, implementation: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("upgraded"),), implementation.clone());
}

pub fn ownership_transferred(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("owner_xfr"), previous.clone()),
        new_owner.clone(),
    );
}

pub fn upgrades_frozen(env: &Env, by: &Address) {
    env.events().publish((symbol_short!("frozen"),), by.clone());
}
