#![no_std]

//! # Heir Policy
//!
//! Per-vault heir distribution policies for the Heritage inheritance suite.
//!
//! A policy is a non-empty, duplicate-free list of `(heir, share)` pairs whose
//! basis-point shares sum to exactly `PERCENTAGE_BASE` (10_000).  The sum
//! invariant is enforced at write time by [`HeirPolicyContract::set_heir_policy`]
//! and re-verified by the pure [`HeirPolicyContract::validate_distribution`]
//! view, which the unlock executor consults before authorizing any release —
//! a malformed policy can therefore never reach distribution.

pub mod events;
pub mod policy;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use common::{pausable, roles, MAX_HEIRS, PERCENTAGE_BASE};
use vault_registry::{vault::Vault, VaultRegistryContractClient};

use policy::HeirEntry;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum HeirPolicyError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    InvalidInput = 5,
    InvalidShareTotal = 6,
    DuplicateHeir = 7,
    TooManyHeirs = 8,
    PolicyNotFound = 9,
    HeirNotFound = 10,
    InvalidState = 11,
    Paused = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct HeirPolicyContract;

#[contractimpl]
impl HeirPolicyContract {
    /// Bootstrap the policy engine with its admin and the registry address.
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), HeirPolicyError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(HeirPolicyError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Replace the vault's heir policy wholesale.
    ///
    /// Vault-owner-only.  `heirs` and `shares_bps` must be equal-length,
    /// non-empty, duplicate-free, each share positive, and sum to exactly
    /// 10_000 bps.  `options` is carried for forward compatibility and is
    /// currently unused.
    pub fn set_heir_policy(
        env: Env,
        caller: Address,
        vault_id: u64,
        heirs: Vec<Address>,
        shares_bps: Vec<u32>,
        options: u32,
    ) -> Result<(), HeirPolicyError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| HeirPolicyError::Paused)?;
        let _ = options;

        let vault = Self::load_vault(&env, vault_id)?;
        if vault.owner != caller {
            return Err(HeirPolicyError::Unauthorized);
        }
        if vault.status.is_terminal() {
            return Err(HeirPolicyError::InvalidState);
        }

        if heirs.is_empty() || heirs.len() != shares_bps.len() {
            return Err(HeirPolicyError::InvalidInput);
        }
        if heirs.len() > MAX_HEIRS {
            return Err(HeirPolicyError::TooManyHeirs);
        }

        let mut entries: Vec<HeirEntry> = Vec::new(&env);
        let mut total: u32 = 0;
        for i in 0..heirs.len() {
            let heir = heirs.get(i).ok_or(HeirPolicyError::InvalidInput)?;
            let share_bps = shares_bps.get(i).ok_or(HeirPolicyError::InvalidInput)?;
            if share_bps == 0 {
                return Err(HeirPolicyError::InvalidInput);
            }
            if policy::contains_heir(&entries, &heir) {
                return Err(HeirPolicyError::DuplicateHeir);
            }
            total = total
                .checked_add(share_bps)
                .ok_or(HeirPolicyError::InvalidShareTotal)?;
            entries.push_back(HeirEntry {
                heir,
                share_bps,
                claimed: false,
            });
        }
        if total != PERCENTAGE_BASE {
            return Err(HeirPolicyError::InvalidShareTotal);
        }

        policy::store(&env, vault_id, &entries);
        events::publish_policy_set(&env, vault_id, &caller, entries.len());
        Ok(())
    }

    /// Append a single heir to the vault's policy.
    ///
    /// Owner tooling convenience: the appended list may be temporarily
    /// incomplete (sum below 10_000) and only becomes distributable once
    /// `validate_distribution` sees the exact total again.  Overshooting the
    /// total is rejected outright.
    pub fn add_heir(
        env: Env,
        caller: Address,
        vault_id: u64,
        heir: Address,
        share_bps: u32,
    ) -> Result<(), HeirPolicyError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| HeirPolicyError::Paused)?;

        let vault = Self::load_vault(&env, vault_id)?;
        if vault.owner != caller {
            return Err(HeirPolicyError::Unauthorized);
        }
        if vault.status.is_terminal() {
            return Err(HeirPolicyError::InvalidState);
        }
        if share_bps == 0 {
            return Err(HeirPolicyError::InvalidInput);
        }

        let mut entries = policy::load(&env, vault_id).unwrap_or_else(|| Vec::new(&env));
        if entries.len() >= MAX_HEIRS {
            return Err(HeirPolicyError::TooManyHeirs);
        }
        if policy::contains_heir(&entries, &heir) {
            return Err(HeirPolicyError::DuplicateHeir);
        }
        let total = policy::sum_shares(&entries)
            .and_then(|t| t.checked_add(share_bps))
            .ok_or(HeirPolicyError::InvalidShareTotal)?;
        if total > PERCENTAGE_BASE {
            return Err(HeirPolicyError::InvalidShareTotal);
        }

        entries.push_back(HeirEntry {
            heir: heir.clone(),
            share_bps,
            claimed: false,
        });
        policy::store(&env, vault_id, &entries);

        events::publish_heir_added(&env, vault_id, &heir, share_bps);
        Ok(())
    }

    /// Pure recomputation of the exact-sum invariant over the stored entries.
    pub fn validate_distribution(env: Env, vault_id: u64) -> bool {
        match policy::load(&env, vault_id) {
            Some(entries) => policy::is_complete(&entries),
            None => false,
        }
    }

    /// Current heir entries; empty when no policy has been set.
    pub fn get_heirs(env: Env, vault_id: u64) -> Vec<HeirEntry> {
        policy::load(&env, vault_id).unwrap_or_else(|| Vec::new(&env))
    }

    pub fn has_policy(env: Env, vault_id: u64) -> bool {
        policy::load(&env, vault_id).is_some()
    }

    /// Flip an heir's claimed marker during execution.
    ///
    /// Role-gated: only `ROLE_EXECUTOR` holders (the unlock executor
    /// contract) may call this.
    pub fn mark_claimed(
        env: Env,
        caller: Address,
        vault_id: u64,
        heir: Address,
    ) -> Result<(), HeirPolicyError> {
        caller.require_auth();
        pausable::require_not_paused(&env).map_err(|_| HeirPolicyError::Paused)?;
        roles::require_role(&env, roles::ROLE_EXECUTOR, &caller)
            .map_err(|_| HeirPolicyError::Unauthorized)?;

        let entries = policy::load(&env, vault_id).ok_or(HeirPolicyError::PolicyNotFound)?;
        let mut updated: Vec<HeirEntry> = Vec::new(&env);
        let mut found = false;
        for entry in entries.iter() {
            if entry.heir == heir {
                found = true;
                updated.push_back(HeirEntry {
                    claimed: true,
                    ..entry
                });
            } else {
                updated.push_back(entry);
            }
        }
        if !found {
            return Err(HeirPolicyError::HeirNotFound);
        }

        policy::store(&env, vault_id, &updated);
        events::publish_heir_claimed(&env, vault_id, &heir);
        Ok(())
    }

    // ── Administration ────────────────────────────────────────────────────────

    /// Grant `ROLE_EXECUTOR` to the unlock executor contract address.
    pub fn grant_executor(env: Env, admin: Address, who: Address) -> Result<(), HeirPolicyError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::grant_role(&env, roles::ROLE_EXECUTOR, &who);
        events::publish_executor_changed(&env, &who, true);
        Ok(())
    }

    pub fn revoke_executor(env: Env, admin: Address, who: Address) -> Result<(), HeirPolicyError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::revoke_role(&env, roles::ROLE_EXECUTOR, &who);
        events::publish_executor_changed(&env, &who, false);
        Ok(())
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), HeirPolicyError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), HeirPolicyError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn load_vault(env: &Env, vault_id: u64) -> Result<Vault, HeirPolicyError> {
        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(HeirPolicyError::NotInitialized)?;
        VaultRegistryContractClient::new(env, &registry)
            .find_vault(&vault_id)
            .ok_or(HeirPolicyError::VaultNotFound)
    }

    fn require_initialized(env: &Env) -> Result<(), HeirPolicyError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(HeirPolicyError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), HeirPolicyError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(HeirPolicyError::NotInitialized)?;
        if admin != *caller {
            return Err(HeirPolicyError::Unauthorized);
        }
        Ok(())
    }
}
