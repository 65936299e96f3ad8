//! Emergency pause guard shared by the vault contracts.

#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Returns `true` when the contract is paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard — returns `CommonError::Paused` when the contract is paused.
///
/// Placed at the top of every state-mutating entry point.  Read-only views
/// must stay callable while paused, so they do **not** use this guard.
pub fn require_not_paused(env: &Env) -> Result<(), CommonError> {
    if is_paused(env) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

/// Pause the contract.  Admin authorization is enforced by the caller — this
/// module carries no admin model of its own so it stays reusable.
pub fn pause(env: &Env, caller: &Address) {
    env.storage().instance().set(&PAUSED, &true);
    env.events()
        .publish((symbol_short!("PAUSED"), caller.clone()), true);
}

/// Unpause the contract.
pub fn unpause(env: &Env, caller: &Address) {
    env.storage().instance().set(&PAUSED, &false);
    env.events()
        .publish((symbol_short!("UNPAUSED"), caller.clone()), true);
}
