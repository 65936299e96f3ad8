#![no_std]

//! # Vault Registry
//!
//! Authoritative owner of vault identity and lifecycle for the Heritage
//! inheritance suite:
//!
//! - **Id allocation**: monotone `u64` ids, never reused.
//! - **Lifecycle machine**: `Active → Locked → Unlocked → Finalized`, with
//!   owner cancellation from Active/Locked; terminal states are immutable.
//! - **Status transitions** are driven only by role holders (the timelock
//!   scheduler and the unlock executor, granted `ROLE_VAULT_MGR` by the
//!   admin) and by the owner's `close_vault`.
//!
//! Every other contract in the suite validates vault ids against this
//! registry before operating.

pub mod events;
pub mod vault;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use common::{pausable, roles, VaultStatus, MAX_UNLOCK_WINDOW, MIN_UNLOCK_DELAY};

use vault::Vault;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    InvalidUnlockTime = 5,
    NoUnlockMechanism = 6,
    InvalidState = 7,
    InvalidInput = 8,
    Paused = 9,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct VaultRegistryContract;

#[contractimpl]
impl VaultRegistryContract {
    /// Bootstrap the registry with its admin address.
    pub fn initialize(env: Env, admin: Address) -> Result<(), VaultError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    // ── Vault creation and closure ────────────────────────────────────────────

    /// Create a vault owned by `caller`.
    ///
    /// At least one unlock mechanism must be configured: a positive
    /// `unlock_time`, proof-of-life, or an oracle condition.  A nonzero
    /// `unlock_time` must fall in
    /// `[now + MIN_UNLOCK_DELAY, now + MAX_UNLOCK_WINDOW]`.
    pub fn create_vault(
        env: Env,
        caller: Address,
        unlock_time: u64,
        unlock_block: u32,
        proof_of_life_enabled: bool,
        oracle_enabled: bool,
    ) -> Result<u64, VaultError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| VaultError::Paused)?;

        if unlock_time == 0 && !proof_of_life_enabled && !oracle_enabled {
            return Err(VaultError::NoUnlockMechanism);
        }

        let now = env.ledger().timestamp();
        if unlock_time != 0 {
            if unlock_time < now.saturating_add(MIN_UNLOCK_DELAY)
                || unlock_time > now.saturating_add(MAX_UNLOCK_WINDOW)
            {
                return Err(VaultError::InvalidUnlockTime);
            }
        }
        if unlock_block != 0 && unlock_block <= env.ledger().sequence() {
            return Err(VaultError::InvalidInput);
        }

        let id = vault::next_id(&env);
        let record = Vault {
            id,
            owner: caller.clone(),
            status: VaultStatus::Active,
            created_at: now,
            unlock_time,
            unlock_block,
            proof_of_life_enabled,
            oracle_enabled,
        };
        vault::store(&env, &record);
        vault::index_for_owner(&env, &caller, id);

        events::publish_vault_created(&env, &record);
        Ok(id)
    }

    /// Owner cancels a vault.  Allowed only while Active or Locked; the
    /// Cancelled state is terminal.
    pub fn close_vault(env: Env, caller: Address, id: u64) -> Result<(), VaultError> {
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(|_| VaultError::Paused)?;

        let mut record = vault::load(&env, id).ok_or(VaultError::VaultNotFound)?;
        if record.owner != caller {
            return Err(VaultError::Unauthorized);
        }
        if !record.status.can_transition_to(VaultStatus::Cancelled) {
            return Err(VaultError::InvalidState);
        }

        record.status = VaultStatus::Cancelled;
        vault::store(&env, &record);

        events::publish_vault_closed(&env, id, &caller);
        Ok(())
    }

    // ── Lifecycle transitions (role-gated) ────────────────────────────────────

    /// Advance a vault's lifecycle status.
    ///
    /// Only `ROLE_VAULT_MGR` holders — the timelock scheduler and the unlock
    /// executor contracts — may call this, and only for the transitions the
    /// lifecycle machine admits.  Cancellation goes through `close_vault`
    /// exclusively.
    pub fn set_status(
        env: Env,
        caller: Address,
        id: u64,
        new_status: VaultStatus,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(|_| VaultError::Paused)?;
        roles::require_role(&env, roles::ROLE_VAULT_MGR, &caller)
            .map_err(|_| VaultError::Unauthorized)?;

        if matches!(new_status, VaultStatus::Active | VaultStatus::Cancelled) {
            return Err(VaultError::InvalidInput);
        }

        let mut record = vault::load(&env, id).ok_or(VaultError::VaultNotFound)?;
        if !record.status.can_transition_to(new_status) {
            return Err(VaultError::InvalidState);
        }

        record.status = new_status;
        vault::store(&env, &record);

        events::publish_status_changed(&env, id, &caller, new_status);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Fetch a vault, failing with `VaultNotFound` for unknown ids.
    pub fn get_vault(env: Env, id: u64) -> Result<Vault, VaultError> {
        vault::load(&env, id).ok_or(VaultError::VaultNotFound)
    }

    /// Infallible lookup used by collaborator contracts.
    pub fn find_vault(env: Env, id: u64) -> Option<Vault> {
        vault::load(&env, id)
    }

    /// Whether the registry knows `id`.
    pub fn has_vault(env: Env, id: u64) -> bool {
        vault::load(&env, id).is_some()
    }

    /// Insertion-ordered list of vault ids created by `owner`.
    pub fn get_vaults_by_owner(env: Env, owner: Address) -> Vec<u64> {
        vault::owned_by(&env, &owner)
    }

    /// Total number of vaults ever created.
    pub fn get_vault_count(env: Env) -> u64 {
        vault::vault_count(&env)
    }

    // ── Administration ────────────────────────────────────────────────────────

    /// Grant `ROLE_VAULT_MGR` to a collaborator contract address.
    pub fn grant_vault_manager(env: Env, admin: Address, who: Address) -> Result<(), VaultError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::grant_role(&env, roles::ROLE_VAULT_MGR, &who);
        events::publish_manager_changed(&env, &who, true);
        Ok(())
    }

    pub fn revoke_vault_manager(env: Env, admin: Address, who: Address) -> Result<(), VaultError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::revoke_role(&env, roles::ROLE_VAULT_MGR, &who);
        events::publish_manager_changed(&env, &who, false);
        Ok(())
    }

    pub fn is_vault_manager(env: Env, who: Address) -> bool {
        roles::has_role(&env, roles::ROLE_VAULT_MGR, &who)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), VaultError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), VaultError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VaultError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(VaultError::NotInitialized)?;
        if admin != *caller {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }
}
