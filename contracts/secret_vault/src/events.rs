//! Structured event publishing for the secret vault.

use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn publish_secret_stored(env: &Env, id: u64, depositor: &Address, hash: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("SEC_STORE"), id), (depositor.clone(), hash.clone()));
}

pub fn publish_secret_revoked(env: &Env, id: u64, owner: &Address) {
    env.events()
        .publish((symbol_short!("SEC_REVK"), id), owner.clone());
}

pub fn publish_reveal_authorized(env: &Env, id: u64, by: &Address) {
    env.events()
        .publish((symbol_short!("SEC_AUTH"), id), by.clone());
}

pub fn publish_secret_revealed(env: &Env, id: u64, to: &Address) {
    env.events()
        .publish((symbol_short!("SEC_REVL"), id), to.clone());
}
