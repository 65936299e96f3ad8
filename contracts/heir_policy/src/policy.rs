//! Heir entries and distribution-invariant helpers.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use common::PERCENTAGE_BASE;

pub(crate) const POLICY: Symbol = symbol_short!("POLICY");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// One heir's entitlement: a basis-point share of the vault's distribution
/// plus the claimed marker flipped during execution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeirEntry {
    pub heir: Address,
    pub share_bps: u32,
    pub claimed: bool,
}

/// Sum of all shares, or `None` on overflow.
pub(crate) fn sum_shares(entries: &Vec<HeirEntry>) -> Option<u32> {
    let mut total: u32 = 0;
    for entry in entries.iter() {
        total = total.checked_add(entry.share_bps)?;
    }
    Some(total)
}

/// The exact-sum invariant: a non-empty list whose shares total exactly
/// `PERCENTAGE_BASE`.
pub(crate) fn is_complete(entries: &Vec<HeirEntry>) -> bool {
    !entries.is_empty() && sum_shares(entries) == Some(PERCENTAGE_BASE)
}

pub(crate) fn contains_heir(entries: &Vec<HeirEntry>, heir: &Address) -> bool {
    entries.iter().any(|e| e.heir == *heir)
}

fn policy_key(id: u64) -> (Symbol, u64) {
    (POLICY, id)
}

pub(crate) fn store(env: &Env, id: u64, entries: &Vec<HeirEntry>) {
    let key = policy_key(id);
    env.storage().persistent().set(&key, entries);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<Vec<HeirEntry>> {
    env.storage().persistent().get(&policy_key(id))
}
