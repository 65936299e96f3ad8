//! Vault record, id allocation, and storage helpers.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use common::VaultStatus;

pub(crate) const VAULT_CTR: Symbol = symbol_short!("VLT_CTR");
pub(crate) const VAULT: Symbol = symbol_short!("VAULT");
pub(crate) const OWNER_IDX: Symbol = symbol_short!("OWN_IDX");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// A single inheritance unit: one owner, one lifecycle status, and the core
/// unlock parameters.  All other contracts reference it by `id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vault {
    pub id: u64,
    pub owner: Address,
    pub status: VaultStatus,
    pub created_at: u64,
    /// Absolute unlock timestamp, or 0 when no time condition is set.
    pub unlock_time: u64,
    /// Ledger sequence gate, or 0 when no block condition is set.
    pub unlock_block: u32,
    pub proof_of_life_enabled: bool,
    pub oracle_enabled: bool,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

/// Allocate the next vault id.  Ids are monotone starting at 1 and are never
/// reused, even after cancellation.
pub(crate) fn next_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&VAULT_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&VAULT_CTR, &id);
    id
}

pub(crate) fn vault_count(env: &Env) -> u64 {
    env.storage().instance().get(&VAULT_CTR).unwrap_or(0u64)
}

fn vault_key(id: u64) -> (Symbol, u64) {
    (VAULT, id)
}

pub(crate) fn store(env: &Env, vault: &Vault) {
    let key = vault_key(vault.id);
    env.storage().persistent().set(&key, vault);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<Vault> {
    env.storage().persistent().get(&vault_key(id))
}

/// Append `id` to the owner's insertion-ordered vault index.
pub(crate) fn index_for_owner(env: &Env, owner: &Address, id: u64) {
    let key = (OWNER_IDX, owner.clone());
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    ids.push_back(id);
    env.storage().persistent().set(&key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn owned_by(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&(OWNER_IDX, owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}
