//! Structured event publishing for the timelock scheduler.

use soroban_sdk::{symbol_short, Address, Env};

use crate::schedule::UnlockSchedule;

pub fn publish_unlock_scheduled(env: &Env, schedule: &UnlockSchedule) {
    env.events().publish(
        (symbol_short!("SCHED_SET"), schedule.vault_id),
        (schedule.unlock_time, schedule.unlock_block),
    );
}

pub fn publish_unlock_triggered(env: &Env, id: u64, caller: &Address) {
    env.events().publish(
        (symbol_short!("UNLK_TRIG"), id),
        (caller.clone(), env.ledger().timestamp()),
    );
}
