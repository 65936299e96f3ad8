//! Structured event publishing for the vault registry.

use soroban_sdk::{symbol_short, Address, Env};

use common::VaultStatus;

use crate::vault::Vault;

pub fn publish_vault_created(env: &Env, vault: &Vault) {
    env.events().publish(
        (symbol_short!("VLT_NEW"), vault.id),
        (
            vault.owner.clone(),
            vault.unlock_time,
            vault.unlock_block,
            vault.proof_of_life_enabled,
            vault.oracle_enabled,
        ),
    );
}

pub fn publish_vault_closed(env: &Env, id: u64, owner: &Address) {
    env.events()
        .publish((symbol_short!("VLT_CLOSE"), id), owner.clone());
}

pub fn publish_status_changed(env: &Env, id: u64, actor: &Address, status: VaultStatus) {
    env.events()
        .publish((symbol_short!("VLT_STAT"), id), (actor.clone(), status));
}

pub fn publish_manager_changed(env: &Env, who: &Address, granted: bool) {
    env.events()
        .publish((symbol_short!("VLT_MGR"), who.clone()), granted);
}
