#![no_std]

//! # Oracle Bridge
//!
//! External-attestation conditions for the Heritage inheritance suite.
//!
//! The admin maintains an explicit trusted-oracle set.  A vault owner binds
//! one trusted oracle to the vault together with an opaque condition
//! identifier and payload; only that *exact* oracle — not merely any trusted
//! oracle — may fulfil the condition, exactly once.  Fulfillment is a
//! durable, timestamped fact the unlock executor reads through
//! [`OracleBridgeContract::check_condition`].

pub mod condition;
pub mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol};

use common::pausable;
use vault_registry::{vault::Vault, VaultRegistryContractClient};

use condition::OracleCondition;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const TRUSTED: Symbol = symbol_short!("TRUSTED");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OracleError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    ConditionNotFound = 5,
    UntrustedOracle = 6,
    AlreadyFulfilled = 7,
    InvalidState = 8,
    Paused = 9,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct OracleBridgeContract;

#[contractimpl]
impl OracleBridgeContract {
    /// Bootstrap the bridge with its admin and the registry address.
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), OracleError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(OracleError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    // ── Trusted-oracle set ────────────────────────────────────────────────────

    pub fn add_trusted_oracle(env: Env, admin: Address, oracle: Address) -> Result<(), OracleError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        env.storage()
            .persistent()
            .set(&(TRUSTED, oracle.clone()), &true);
        events::publish_trusted_oracle_changed(&env, &oracle, true);
        Ok(())
    }

    pub fn remove_trusted_oracle(
        env: Env,
        admin: Address,
        oracle: Address,
    ) -> Result<(), OracleError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        env.storage().persistent().remove(&(TRUSTED, oracle.clone()));
        events::publish_trusted_oracle_changed(&env, &oracle, false);
        Ok(())
    }

    pub fn is_trusted_oracle(env: Env, oracle: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(TRUSTED, oracle))
            .unwrap_or(false)
    }

    // ── Condition lifecycle ───────────────────────────────────────────────────

    /// Bind an oracle condition to a vault.
    ///
    /// Vault-owner-only.  The oracle must be in the trusted set.  An
    /// unfulfilled condition may be replaced; a fulfilled one is immutable.
    pub fn set_oracle_condition(
        env: Env,
        caller: Address,
        vault_id: u64,
        oracle: Address,
        condition_id: BytesN<32>,
        condition_data: Bytes,
    ) -> Result<(), OracleError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| OracleError::Paused)?;

        let vault = Self::load_vault(&env, vault_id)?;
        if vault.owner != caller {
            return Err(OracleError::Unauthorized);
        }
        if vault.status.is_terminal() {
            return Err(OracleError::InvalidState);
        }
        if !Self::trusted(&env, &oracle) {
            return Err(OracleError::UntrustedOracle);
        }
        if let Some(existing) = condition::load(&env, vault_id) {
            if existing.fulfilled {
                return Err(OracleError::AlreadyFulfilled);
            }
        }

        let record = OracleCondition {
            vault_id,
            oracle: oracle.clone(),
            condition_id: condition_id.clone(),
            condition_data,
            fulfilled: false,
            fulfillment_time: 0,
        };
        condition::store(&env, &record);

        events::publish_condition_set(&env, vault_id, &oracle, &condition_id);
        Ok(())
    }

    /// Fulfil a vault's condition.
    ///
    /// Only the exact oracle bound to this vault may call this — a different
    /// trusted oracle is rejected the same as any stranger.  Exactly-once:
    /// re-invocation fails `AlreadyFulfilled`.
    pub fn fulfill_condition(
        env: Env,
        caller: Address,
        vault_id: u64,
        request_id: BytesN<32>,
        response_data: Bytes,
    ) -> Result<(), OracleError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| OracleError::Paused)?;
        let _ = response_data;

        let mut record = condition::load(&env, vault_id).ok_or(OracleError::ConditionNotFound)?;
        if record.oracle != caller {
            return Err(OracleError::Unauthorized);
        }
        if record.fulfilled {
            return Err(OracleError::AlreadyFulfilled);
        }

        record.fulfilled = true;
        record.fulfillment_time = env.ledger().timestamp();
        condition::store(&env, &record);

        events::publish_condition_fulfilled(&env, vault_id, &caller, &request_id);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Whether the vault's condition has been fulfilled.  `false` when no
    /// condition is set.
    pub fn check_condition(env: Env, vault_id: u64) -> bool {
        condition::load(&env, vault_id)
            .map(|c| c.fulfilled)
            .unwrap_or(false)
    }

    pub fn get_condition(env: Env, vault_id: u64) -> Result<OracleCondition, OracleError> {
        condition::load(&env, vault_id).ok_or(OracleError::ConditionNotFound)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), OracleError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), OracleError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn trusted(env: &Env, oracle: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&(TRUSTED, oracle.clone()))
            .unwrap_or(false)
    }

    fn load_vault(env: &Env, vault_id: u64) -> Result<Vault, OracleError> {
        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(OracleError::NotInitialized)?;
        VaultRegistryContractClient::new(env, &registry)
            .find_vault(&vault_id)
            .ok_or(OracleError::VaultNotFound)
    }

    fn require_initialized(env: &Env) -> Result<(), OracleError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(OracleError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), OracleError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(OracleError::NotInitialized)?;
        if admin != *caller {
            return Err(OracleError::Unauthorized);
        }
        Ok(())
    }
}
