#![no_std]

//! # Proof of Life
//!
//! Per-vault owner check-in ledger and inactivity detection for the Heritage
//! inheritance suite.
//!
//! The monitor runs no timers.  Liveness is computed lazily by
//! [`ProofOfLifeContract::is_active`]; becoming durably inactive requires an
//! explicit [`ProofOfLifeContract::mark_inactive`] call, which any party may
//! make but which only succeeds once `inactivity_period + grace_period` has
//! elapsed since the last check-in.  The grace window defaults to 8 days and
//! is fixed per deployment at contract initialization.
//!
//! An owner check-in at any point — even after the vault was marked
//! inactive — resets the clock and restores the active flag in the same
//! atomic step.

pub mod events;
pub mod record;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

use common::{pausable, DEFAULT_GRACE_PERIOD};
use vault_registry::{vault::Vault, VaultRegistryContractClient};

use record::ProofOfLifeRecord;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const GRACE: Symbol = symbol_short!("GRACE");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProofOfLifeError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    MonitorNotFound = 5,
    AlreadyMonitored = 6,
    InvalidInput = 7,
    TooEarly = 8,
    AlreadyDone = 9,
    Paused = 10,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ProofOfLifeContract;

#[contractimpl]
impl ProofOfLifeContract {
    /// Bootstrap the monitor.
    ///
    /// * `grace_period` — seconds added to each vault's inactivity period
    ///   before `mark_inactive` may succeed.  `None` selects the protocol
    ///   default of 8 days.  Zero is rejected: the grace window is the
    ///   owner's last defence against a premature inactivity claim.
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        grace_period: Option<u64>,
    ) -> Result<(), ProofOfLifeError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ProofOfLifeError::AlreadyInitialized);
        }
        let grace = grace_period.unwrap_or(DEFAULT_GRACE_PERIOD);
        if grace == 0 {
            return Err(ProofOfLifeError::InvalidInput);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&GRACE, &grace);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// One-time monitor setup for a vault.
    ///
    /// Only the vault owner may configure monitoring; `owner` is the
    /// principal whose check-ins count (usually the vault owner, possibly a
    /// delegate key).
    pub fn init_monitor(
        env: Env,
        caller: Address,
        vault_id: u64,
        owner: Address,
        inactivity_period: u64,
    ) -> Result<(), ProofOfLifeError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| ProofOfLifeError::Paused)?;

        let vault = Self::load_vault(&env, vault_id)?;
        if vault.owner != caller {
            return Err(ProofOfLifeError::Unauthorized);
        }
        if inactivity_period == 0 {
            return Err(ProofOfLifeError::InvalidInput);
        }
        if record::load(&env, vault_id).is_some() {
            return Err(ProofOfLifeError::AlreadyMonitored);
        }

        let rec = ProofOfLifeRecord {
            vault_id,
            owner: owner.clone(),
            inactivity_period,
            last_check_in: env.ledger().timestamp(),
            active: true,
        };
        record::store(&env, &rec);

        events::publish_monitor_initialized(&env, vault_id, &owner, inactivity_period);
        Ok(())
    }

    /// Owner liveness signal.  Resets the inactivity clock and — if the vault
    /// had been marked inactive — restores the active flag in the same write.
    pub fn check_in(env: Env, caller: Address, vault_id: u64) -> Result<(), ProofOfLifeError> {
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(|_| ProofOfLifeError::Paused)?;

        let mut rec = record::load(&env, vault_id).ok_or(ProofOfLifeError::MonitorNotFound)?;
        if rec.owner != caller {
            return Err(ProofOfLifeError::Unauthorized);
        }

        rec.last_check_in = env.ledger().timestamp();
        rec.active = true;
        record::store(&env, &rec);

        events::publish_checked_in(&env, vault_id, &caller);
        Ok(())
    }

    /// Lazy liveness view: `true` while the last check-in is within the
    /// inactivity period and the vault has not been durably marked inactive.
    pub fn is_active(env: Env, vault_id: u64) -> bool {
        match record::load(&env, vault_id) {
            Some(rec) => rec.is_live(env.ledger().timestamp()),
            None => false,
        }
    }

    /// Durable inactivity flag consulted by the unlock executor.
    pub fn is_marked_inactive(env: Env, vault_id: u64) -> bool {
        match record::load(&env, vault_id) {
            Some(rec) => !rec.active,
            None => false,
        }
    }

    /// Durably mark a vault's owner inactive.
    ///
    /// Open to any caller, but succeeds only once
    /// `now − last_check_in > inactivity_period + grace_period`; fails
    /// `TooEarly` before that and `AlreadyDone` once marked.
    pub fn mark_inactive(env: Env, caller: Address, vault_id: u64) -> Result<(), ProofOfLifeError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| ProofOfLifeError::Paused)?;

        let mut rec = record::load(&env, vault_id).ok_or(ProofOfLifeError::MonitorNotFound)?;
        if !rec.active {
            return Err(ProofOfLifeError::AlreadyDone);
        }

        let now = env.ledger().timestamp();
        let elapsed = now.saturating_sub(rec.last_check_in);
        let threshold = rec.inactivity_period.saturating_add(Self::grace_period(&env));
        if elapsed <= threshold {
            return Err(ProofOfLifeError::TooEarly);
        }

        rec.active = false;
        record::store(&env, &rec);

        events::publish_marked_inactive(&env, vault_id, &caller);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn get_last_check_in(env: Env, vault_id: u64) -> Result<u64, ProofOfLifeError> {
        record::load(&env, vault_id)
            .map(|r| r.last_check_in)
            .ok_or(ProofOfLifeError::MonitorNotFound)
    }

    pub fn get_record(env: Env, vault_id: u64) -> Result<ProofOfLifeRecord, ProofOfLifeError> {
        record::load(&env, vault_id).ok_or(ProofOfLifeError::MonitorNotFound)
    }

    /// The deployment-wide grace window in seconds.
    pub fn get_grace_period(env: Env) -> u64 {
        Self::grace_period(&env)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), ProofOfLifeError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), ProofOfLifeError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn grace_period(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&GRACE)
            .unwrap_or(DEFAULT_GRACE_PERIOD)
    }

    fn load_vault(env: &Env, vault_id: u64) -> Result<Vault, ProofOfLifeError> {
        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(ProofOfLifeError::NotInitialized)?;
        VaultRegistryContractClient::new(env, &registry)
            .find_vault(&vault_id)
            .ok_or(ProofOfLifeError::VaultNotFound)
    }

    fn require_initialized(env: &Env) -> Result<(), ProofOfLifeError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ProofOfLifeError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ProofOfLifeError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ProofOfLifeError::NotInitialized)?;
        if admin != *caller {
            return Err(ProofOfLifeError::Unauthorized);
        }
        Ok(())
    }
}
