use soroban_sdk::{symbol_short, Env, String};

pub fn value_updated(env: &Env, value: u128) {
    env.events().publish((symbol_short!("value_upd"),), value);
}

pub fn name_updated(env: &Env, name: &String) {
    env.events()
        .publish((symbol_short!("name_upd"),), name.clone());
}

pub fn count_incremented(env: &Env, count: u64) {
    env.events().publish((symbol_short!("count_inc"),), count);
}
