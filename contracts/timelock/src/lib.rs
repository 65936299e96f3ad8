#![no_std]

//! # Timelock Scheduler
//!
//! Per-vault absolute-time / ledger-sequence unlock schedules for the
//! Heritage inheritance suite.
//!
//! Readiness is computed lazily: [`TimelockVaultContract::is_unlockable`] is a
//! pure view with no timer behind it, and some external caller must invoke
//! [`TimelockVaultContract::trigger_unlock`] once the schedule is satisfied.
//! Correctness does not depend on prompt triggering — the trigger succeeds at
//! any point after the gates pass, and exactly once.
//!
//! The scheduler drives vault status through the registry: the first schedule
//! moves an Active vault to Locked, and the trigger moves it to Unlocked.
//! Both go through the registry's role-gated `set_status`, so this contract's
//! address must hold `ROLE_VAULT_MGR` there.

pub mod events;
pub mod schedule;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

use common::{pausable, VaultStatus};
use vault_registry::{vault::Vault, VaultRegistryContractClient};

use schedule::UnlockSchedule;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TimelockError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    NotScheduled = 5,
    InvalidSchedule = 6,
    InvalidState = 7,
    NotYetUnlockable = 8,
    AlreadyDone = 9,
    Paused = 10,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TimelockVaultContract;

#[contractimpl]
impl TimelockVaultContract {
    /// Bootstrap the scheduler with its admin and the vault registry address.
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), TimelockError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(TimelockError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Set or replace the unlock schedule for a vault.
    ///
    /// Vault-owner-only.  At least one of `unlock_time` / `unlock_block` must
    /// be nonzero and lie in the future.  Re-scheduling is permitted only
    /// while the current schedule is not yet satisfied and has not been
    /// triggered.  The first schedule locks an Active vault.
    pub fn schedule_unlock(
        env: Env,
        caller: Address,
        vault_id: u64,
        unlock_time: u64,
        unlock_block: u32,
    ) -> Result<(), TimelockError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| TimelockError::Paused)?;

        let vault = Self::load_vault(&env, vault_id)?;
        if vault.owner != caller {
            return Err(TimelockError::Unauthorized);
        }
        if vault.status.is_terminal() {
            return Err(TimelockError::InvalidState);
        }

        let now = env.ledger().timestamp();
        let sequence = env.ledger().sequence();
        if unlock_time == 0 && unlock_block == 0 {
            return Err(TimelockError::InvalidSchedule);
        }
        if unlock_time != 0 && unlock_time <= now {
            return Err(TimelockError::InvalidSchedule);
        }
        if unlock_block != 0 && unlock_block <= sequence {
            return Err(TimelockError::InvalidSchedule);
        }

        let first_schedule = match schedule::load(&env, vault_id) {
            None => true,
            Some(existing) if existing.triggered => return Err(TimelockError::AlreadyDone),
            Some(existing) if existing.is_satisfied(now, sequence) => {
                return Err(TimelockError::InvalidState)
            }
            Some(_) => false,
        };

        let record = UnlockSchedule {
            vault_id,
            unlock_time,
            unlock_block,
            scheduled_at: now,
            triggered: false,
        };
        schedule::store(&env, &record);

        if first_schedule && vault.status == VaultStatus::Active {
            Self::set_vault_status(&env, vault_id, VaultStatus::Locked)?;
        }

        events::publish_unlock_scheduled(&env, &record);
        Ok(())
    }

    /// Whether the vault's schedule is satisfied right now.  Pure; `false`
    /// when no schedule exists.
    pub fn is_unlockable(env: Env, vault_id: u64) -> bool {
        match schedule::load(&env, vault_id) {
            Some(schedule) => {
                schedule.is_satisfied(env.ledger().timestamp(), env.ledger().sequence())
            }
            None => false,
        }
    }

    /// Fire the one-time unlock for a satisfied schedule.
    ///
    /// Any caller may invoke this.  Fails `NotYetUnlockable` before the
    /// schedule is satisfied and `AlreadyDone` after the first success; the
    /// triggered flag is written in the same atomic step that flips the vault
    /// to Unlocked, so the side effects can never run twice.
    pub fn trigger_unlock(env: Env, caller: Address, vault_id: u64) -> Result<(), TimelockError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| TimelockError::Paused)?;

        let mut record = schedule::load(&env, vault_id).ok_or(TimelockError::NotScheduled)?;
        if record.triggered {
            return Err(TimelockError::AlreadyDone);
        }
        if !record.is_satisfied(env.ledger().timestamp(), env.ledger().sequence()) {
            return Err(TimelockError::NotYetUnlockable);
        }

        record.triggered = true;
        schedule::store(&env, &record);

        Self::set_vault_status(&env, vault_id, VaultStatus::Unlocked)?;

        events::publish_unlock_triggered(&env, vault_id, &caller);
        Ok(())
    }

    /// Current schedule for a vault.
    pub fn get_schedule(env: Env, vault_id: u64) -> Result<UnlockSchedule, TimelockError> {
        schedule::load(&env, vault_id).ok_or(TimelockError::NotScheduled)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), TimelockError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), TimelockError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn registry(env: &Env) -> Result<Address, TimelockError> {
        env.storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(TimelockError::NotInitialized)
    }

    fn load_vault(env: &Env, vault_id: u64) -> Result<Vault, TimelockError> {
        let registry = Self::registry(env)?;
        VaultRegistryContractClient::new(env, &registry)
            .find_vault(&vault_id)
            .ok_or(TimelockError::VaultNotFound)
    }

    fn set_vault_status(env: &Env, vault_id: u64, status: VaultStatus) -> Result<(), TimelockError> {
        let registry = Self::registry(env)?;
        let client = VaultRegistryContractClient::new(env, &registry);
        match client.try_set_status(&env.current_contract_address(), &vault_id, &status) {
            Ok(_) => Ok(()),
            Err(_) => Err(TimelockError::InvalidState),
        }
    }

    fn require_initialized(env: &Env) -> Result<(), TimelockError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(TimelockError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), TimelockError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(TimelockError::NotInitialized)?;
        if admin != *caller {
            return Err(TimelockError::Unauthorized);
        }
        Ok(())
    }
}
