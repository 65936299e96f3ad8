//! Secret record and storage helpers.
//!
//! The chain never holds plaintext.  A record carries an off-chain content
//! pointer (e.g. an IPFS CID) plus the commitment hash of the encrypted
//! payload; possession of the pointer is useless without the off-chain key
//! material released to heirs.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol};

pub(crate) const SECRET: Symbol = symbol_short!("SECRET");

// TTL: ~300 days at 5s/ledger
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecretRecord {
    pub vault_id: u64,
    /// Off-chain pointer to the encrypted payload.
    pub content_id: String,
    /// Commitment over the encrypted payload.
    pub content_hash: BytesN<32>,
    pub depositor: Address,
    pub stored_at: u64,
    /// Set the first time the pointer is handed out.
    pub revealed: bool,
    /// A revoked slot can be written again with a fresh secret.
    pub revoked: bool,
    /// Set by the unlock executor once distribution conditions are met.
    pub released: bool,
}

fn secret_key(id: u64) -> (Symbol, u64) {
    (SECRET, id)
}

pub(crate) fn store(env: &Env, record: &SecretRecord) {
    let key = secret_key(record.vault_id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<SecretRecord> {
    env.storage().persistent().get(&secret_key(id))
}
