//! Persistent role table for privileged cross-contract authorization.
//!
//! Each contract owns its own role table; the admin of that contract grants
//! roles to principal addresses — typically the *contract addresses* of
//! collaborators (e.g. the registry grants `ROLE_VAULT_MGR` to the timelock
//! scheduler and the unlock executor).  Every privileged entry point performs
//! a capability check against this table instead of relying on ambient state.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// May drive vault status transitions through the registry.
pub const ROLE_VAULT_MGR: Symbol = symbol_short!("VAULT_MGR");
/// May mark heir entries claimed in the heir policy contract.
pub const ROLE_EXECUTOR: Symbol = symbol_short!("EXECUTOR");
/// May reveal secrets and authorize their release in the secret vault.
pub const ROLE_REVEALER: Symbol = symbol_short!("REVEALER");

const ROLE_TTL_THRESHOLD: u32 = 5_184_000; // ~300 days @ 5s/ledger
const ROLE_TTL_EXTEND_TO: u32 = 10_368_000; // ~600 days

fn role_key(role: Symbol, who: &Address) -> (Symbol, Symbol, Address) {
    (symbol_short!("ROLE"), role, who.clone())
}

fn extend_role_ttl(env: &Env, key: &(Symbol, Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, ROLE_TTL_THRESHOLD, ROLE_TTL_EXTEND_TO);
}

/// Grant `role` to `who`.  Authorization of the granter is the caller's
/// responsibility — contracts gate this behind their admin check.
pub fn grant_role(env: &Env, role: Symbol, who: &Address) {
    let key = role_key(role, who);
    env.storage().persistent().set(&key, &true);
    extend_role_ttl(env, &key);
}

/// Revoke `role` from `who`.
pub fn revoke_role(env: &Env, role: Symbol, who: &Address) {
    env.storage().persistent().remove(&role_key(role, who));
}

/// Returns whether `who` holds `role`.
pub fn has_role(env: &Env, role: Symbol, who: &Address) -> bool {
    let key = role_key(role, who);
    let held = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        extend_role_ttl(env, &key);
    }
    held
}

/// Capability check — errors with [`crate::CommonError::RoleMissing`] when
/// `who` does not hold `role`.
pub fn require_role(env: &Env, role: Symbol, who: &Address) -> Result<(), crate::CommonError> {
    if !has_role(env, role, who) {
        return Err(crate::CommonError::RoleMissing);
    }
    Ok(())
}
