//! Unlock schedule record and storage helpers.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

pub(crate) const SCHEDULE: Symbol = symbol_short!("SCHED");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Per-vault unlock schedule.
///
/// A schedule is satisfied when *all* of its nonzero gates have passed:
/// `unlock_time` against the ledger clock and `unlock_block` against the
/// ledger sequence.  `triggered` records the one-time trigger so the unlock
/// side effects can never run twice.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockSchedule {
    pub vault_id: u64,
    pub unlock_time: u64,
    pub unlock_block: u32,
    pub scheduled_at: u64,
    pub triggered: bool,
}

impl UnlockSchedule {
    /// Whether every configured gate has passed.  Boundary inclusive.
    pub fn is_satisfied(&self, now: u64, sequence: u32) -> bool {
        let time_ok = self.unlock_time == 0 || now >= self.unlock_time;
        let block_ok = self.unlock_block == 0 || sequence >= self.unlock_block;
        time_ok && block_ok
    }
}

fn schedule_key(id: u64) -> (Symbol, u64) {
    (SCHEDULE, id)
}

pub(crate) fn store(env: &Env, schedule: &UnlockSchedule) {
    let key = schedule_key(schedule.vault_id);
    env.storage().persistent().set(&key, schedule);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<UnlockSchedule> {
    env.storage().persistent().get(&schedule_key(id))
}
