//! Structured event publishing for the proof-of-life monitor.

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_monitor_initialized(env: &Env, id: u64, owner: &Address, inactivity_period: u64) {
    env.events().publish(
        (symbol_short!("POL_INIT"), id),
        (owner.clone(), inactivity_period),
    );
}

pub fn publish_checked_in(env: &Env, id: u64, owner: &Address) {
    env.events().publish(
        (symbol_short!("CHECK_IN"), id),
        (owner.clone(), env.ledger().timestamp()),
    );
}

pub fn publish_marked_inactive(env: &Env, id: u64, caller: &Address) {
    env.events().publish(
        (symbol_short!("INACTIVE"), id),
        (caller.clone(), env.ledger().timestamp()),
    );
}
