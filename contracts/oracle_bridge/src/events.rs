//! Structured event publishing for the oracle bridge.

use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn publish_trusted_oracle_changed(env: &Env, oracle: &Address, trusted: bool) {
    env.events()
        .publish((symbol_short!("ORC_TRUST"), oracle.clone()), trusted);
}

pub fn publish_condition_set(env: &Env, id: u64, oracle: &Address, condition_id: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("ORC_SET"), id),
        (oracle.clone(), condition_id.clone()),
    );
}

pub fn publish_condition_fulfilled(env: &Env, id: u64, oracle: &Address, request_id: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("ORC_FULF"), id),
        (oracle.clone(), request_id.clone(), env.ledger().timestamp()),
    );
}
