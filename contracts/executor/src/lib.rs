#![no_std]

//! # Unlock Executor
//!
//! One-time unlock execution coordinator for the Heritage inheritance suite.
//!
//! The executor is the only component that mutates across contract
//! boundaries.  `can_execute` is a pure read-only probe over the registry,
//! policy engine, scheduler, proof-of-life monitor, and oracle bridge;
//! `execute_unlock` re-validates the same predicate and then performs the
//! distribution.  The per-vault `ExecutionStatus` record is written in the
//! same atomic step that gates execution, *before* any outbound mutating
//! call, so a re-entrant or repeated invocation observes `executed` and
//! stops — execution happens exactly once per vault.

pub mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol,
};

use common::{pausable, VaultStatus};
use heir_policy::HeirPolicyContractClient;
use oracle_bridge::OracleBridgeContractClient;
use proof_of_life::ProofOfLifeContractClient;
use secret_vault::SecretVaultContractClient;
use timelock_vault::TimelockVaultContractClient;
use vault_registry::{vault::Vault, VaultRegistryContractClient};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const WIRING: Symbol = symbol_short!("WIRING");
const EXEC: Symbol = symbol_short!("EXEC");

// TTL: ~300 days at 5s/ledger
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ────────────────────────────────────────────────────────────────────

/// Addresses of every collaborator contract, wired once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborators {
    pub registry: Address,
    pub heir_policy: Address,
    pub timelock: Address,
    pub proof_of_life: Address,
    pub oracle_bridge: Address,
    pub secret_vault: Address,
}

/// Durable per-vault execution record — the idempotency gate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionStatus {
    pub vault_id: u64,
    pub executed: bool,
    pub execution_time: u64,
    pub executed_by: Option<Address>,
}

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ExecutorError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    InvalidState = 5,
    NotReady = 6,
    AlreadyDone = 7,
    ExecutionFailed = 8,
    Paused = 9,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct UnlockExecutorContract;

#[contractimpl]
impl UnlockExecutorContract {
    /// Wire the executor to its admin and every collaborator contract.
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        heir_policy: Address,
        timelock: Address,
        proof_of_life: Address,
        oracle_bridge: Address,
        secret_vault: Address,
    ) -> Result<(), ExecutorError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ExecutorError::AlreadyInitialized);
        }
        let wiring = Collaborators {
            registry,
            heir_policy,
            timelock,
            proof_of_life,
            oracle_bridge,
            secret_vault,
        };
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&WIRING, &wiring);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    // ── Readiness ─────────────────────────────────────────────────────────────

    /// Whether the vault could be executed right now.  Read-only; `false`
    /// for unknown, terminal, already-executed, or incompletely-configured
    /// vaults.
    pub fn can_execute(env: Env, vault_id: u64) -> bool {
        let wiring: Collaborators = match env.storage().instance().get(&WIRING) {
            Some(w) => w,
            None => return false,
        };
        let vault = match VaultRegistryContractClient::new(&env, &wiring.registry)
            .find_vault(&vault_id)
        {
            Some(v) => v,
            None => return false,
        };
        if vault.status.is_terminal() || Self::executed(&env, vault_id) {
            return false;
        }
        if !HeirPolicyContractClient::new(&env, &wiring.heir_policy)
            .validate_distribution(&vault_id)
        {
            return false;
        }
        Self::path_satisfied(&env, &wiring, &vault)
    }

    // ── Execution ─────────────────────────────────────────────────────────────

    /// Distribute the vault to its heirs.
    ///
    /// Open to any caller — readiness, not identity, gates execution.
    /// Exactly-once: the second call fails `AlreadyDone`.
    pub fn execute_unlock(env: Env, caller: Address, vault_id: u64) -> Result<(), ExecutorError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| ExecutorError::Paused)?;

        let wiring = Self::wiring(&env)?;
        let vault = VaultRegistryContractClient::new(&env, &wiring.registry)
            .find_vault(&vault_id)
            .ok_or(ExecutorError::VaultNotFound)?;
        if Self::executed(&env, vault_id) {
            return Err(ExecutorError::AlreadyDone);
        }
        if vault.status.is_terminal() {
            return Err(ExecutorError::InvalidState);
        }
        let policy = HeirPolicyContractClient::new(&env, &wiring.heir_policy);
        if !policy.validate_distribution(&vault_id) {
            return Err(ExecutorError::NotReady);
        }
        if !Self::path_satisfied(&env, &wiring, &vault) {
            return Err(ExecutorError::NotReady);
        }

        // Idempotency record first — before any outbound mutating call.
        let record = ExecutionStatus {
            vault_id,
            executed: true,
            execution_time: env.ledger().timestamp(),
            executed_by: Some(caller.clone()),
        };
        let key = (EXEC, vault_id);
        env.storage().persistent().set(&key, &record);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_execution_started(&env, vault_id, &caller);

        let this = env.current_contract_address();
        for entry in policy.get_heirs(&vault_id).iter() {
            match policy.try_mark_claimed(&this, &vault_id, &entry.heir) {
                Ok(_) => events::publish_heir_distribution(&env, vault_id, &entry.heir, entry.share_bps),
                Err(_) => return Err(ExecutorError::ExecutionFailed),
            }
        }

        let registry = VaultRegistryContractClient::new(&env, &wiring.registry);
        match registry.try_set_status(&this, &vault_id, &VaultStatus::Finalized) {
            Ok(_) => (),
            Err(_) => return Err(ExecutorError::ExecutionFailed),
        }

        let secrets = SecretVaultContractClient::new(&env, &wiring.secret_vault);
        if secrets.has_secret(&vault_id) {
            match secrets.try_authorize_reveal(&this, &vault_id) {
                Ok(_) => (),
                Err(_) => return Err(ExecutorError::ExecutionFailed),
            }
        }

        events::publish_execution_completed(&env, vault_id, &caller);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Durable execution record; a blank record when never executed.
    pub fn get_execution_status(env: Env, vault_id: u64) -> ExecutionStatus {
        env.storage()
            .persistent()
            .get(&(EXEC, vault_id))
            .unwrap_or(ExecutionStatus {
                vault_id,
                executed: false,
                execution_time: 0,
                executed_by: None,
            })
    }

    pub fn get_collaborators(env: Env) -> Result<Collaborators, ExecutorError> {
        Self::wiring(&env)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), ExecutorError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), ExecutorError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// OR over the vault's *configured* unlock mechanisms.
    ///
    /// A schedule can be added after creation regardless of the vault's
    /// creation flags, so the time path asks the scheduler directly — it
    /// answers `false` when no schedule exists.
    fn path_satisfied(env: &Env, wiring: &Collaborators, vault: &Vault) -> bool {
        if TimelockVaultContractClient::new(env, &wiring.timelock).is_unlockable(&vault.id) {
            return true;
        }
        if vault.proof_of_life_enabled
            && ProofOfLifeContractClient::new(env, &wiring.proof_of_life)
                .is_marked_inactive(&vault.id)
        {
            return true;
        }
        if vault.oracle_enabled
            && OracleBridgeContractClient::new(env, &wiring.oracle_bridge)
                .check_condition(&vault.id)
        {
            return true;
        }
        false
    }

    fn executed(env: &Env, vault_id: u64) -> bool {
        env.storage()
            .persistent()
            .get(&(EXEC, vault_id))
            .map(|r: ExecutionStatus| r.executed)
            .unwrap_or(false)
    }

    fn wiring(env: &Env) -> Result<Collaborators, ExecutorError> {
        env.storage()
            .instance()
            .get(&WIRING)
            .ok_or(ExecutorError::NotInitialized)
    }

    fn require_initialized(env: &Env) -> Result<(), ExecutorError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ExecutorError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ExecutorError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ExecutorError::NotInitialized)?;
        if admin != *caller {
            return Err(ExecutorError::Unauthorized);
        }
        Ok(())
    }
}
