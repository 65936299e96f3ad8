//! Check-in record and storage helpers.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub(crate) const RECORD: Symbol = symbol_short!("POL_REC");

// TTL: ~300 days at 5s/ledger — check-in records outlive most other state.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Per-vault proof-of-life ledger entry.
///
/// `active` is the durable flag: it flips to `false` only through
/// `mark_inactive` once the inactivity period plus grace window has elapsed,
/// and back to `true` only through an owner check-in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofOfLifeRecord {
    pub vault_id: u64,
    pub owner: Address,
    pub inactivity_period: u64,
    pub last_check_in: u64,
    pub active: bool,
}

impl ProofOfLifeRecord {
    /// Lazy liveness: within the inactivity window and not durably marked.
    pub fn is_live(&self, now: u64) -> bool {
        self.active && now.saturating_sub(self.last_check_in) <= self.inactivity_period
    }
}

fn record_key(id: u64) -> (Symbol, u64) {
    (RECORD, id)
}

pub(crate) fn store(env: &Env, record: &ProofOfLifeRecord) {
    let key = record_key(record.vault_id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<ProofOfLifeRecord> {
    env.storage().persistent().get(&record_key(id))
}
