//! Oracle condition record and storage helpers.

use soroban_sdk::{contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol};

pub(crate) const CONDITION: Symbol = symbol_short!("ORC_COND");

// TTL: ~300 days at 5s/ledger
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// An external attestation a single bound oracle must fulfil.
///
/// Immutable once `fulfilled` — fulfillment happens exactly once and the
/// recorded `fulfillment_time` is part of the audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleCondition {
    pub vault_id: u64,
    /// The one principal allowed to fulfil this condition.
    pub oracle: Address,
    pub condition_id: BytesN<32>,
    pub condition_data: Bytes,
    pub fulfilled: bool,
    pub fulfillment_time: u64,
}

fn condition_key(id: u64) -> (Symbol, u64) {
    (CONDITION, id)
}

pub(crate) fn store(env: &Env, condition: &OracleCondition) {
    let key = condition_key(condition.vault_id);
    env.storage().persistent().set(&key, condition);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<OracleCondition> {
    env.storage().persistent().get(&condition_key(id))
}
