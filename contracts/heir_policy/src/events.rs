//! Structured event publishing for the heir policy contract.

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_policy_set(env: &Env, id: u64, owner: &Address, heir_count: u32) {
    env.events()
        .publish((symbol_short!("HEIR_SET"), id), (owner.clone(), heir_count));
}

pub fn publish_heir_added(env: &Env, id: u64, heir: &Address, share_bps: u32) {
    env.events()
        .publish((symbol_short!("HEIR_ADD"), id), (heir.clone(), share_bps));
}

pub fn publish_heir_claimed(env: &Env, id: u64, heir: &Address) {
    env.events()
        .publish((symbol_short!("HEIR_CLM"), id), heir.clone());
}

pub fn publish_executor_changed(env: &Env, who: &Address, granted: bool) {
    env.events()
        .publish((symbol_short!("HEIR_EXEC"), who.clone()), granted);
}
