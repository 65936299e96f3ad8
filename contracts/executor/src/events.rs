//! Structured event publishing for the unlock executor.

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_execution_started(env: &Env, id: u64, by: &Address) {
    env.events()
        .publish((symbol_short!("EXE_START"), id), by.clone());
}

pub fn publish_heir_distribution(env: &Env, id: u64, heir: &Address, share_bps: u32) {
    env.events()
        .publish((symbol_short!("EXE_DIST"), id), (heir.clone(), share_bps));
}

pub fn publish_execution_completed(env: &Env, id: u64, by: &Address) {
    env.events().publish(
        (symbol_short!("EXE_DONE"), id),
        (by.clone(), env.ledger().timestamp()),
    );
}
