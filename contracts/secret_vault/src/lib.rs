#![no_std]

//! # Secret Vault
//!
//! Hash-committed secret custody for the Heritage inheritance suite.
//!
//! Each vault holds at most one active secret: an off-chain content pointer
//! plus a commitment hash over the encrypted payload.  The owner may revoke
//! the secret any time before it is first revealed, and a revoked slot may be
//! written again.  Disclosure is two-step: the unlock executor (holding
//! `REVEALER`) calls `authorize_reveal` once distribution conditions are met,
//! after which anyone may fetch the pointer through `reveal_secret`.

pub mod events;
pub mod secret;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, String, Symbol};

use common::{pausable, roles};

use secret::SecretRecord;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");

// ── Error codes ──────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SecretError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    VaultNotFound = 4,
    SecretNotFound = 5,
    SecretExists = 6,
    SecretRevoked = 7,
    AlreadyRevealed = 8,
    NotReleased = 9,
    InvalidInput = 10,
    Paused = 11,
    InvalidState = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SecretVaultContract;

#[contractimpl]
impl SecretVaultContract {
    /// Bootstrap the secret vault with its admin and the registry address.
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), SecretError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(SecretError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    // ── Custody ───────────────────────────────────────────────────────────────

    /// Deposit a secret for the vault.
    ///
    /// Any authenticated caller may deposit — the commitment binds the
    /// content, not the depositor.  One active slot per vault: depositing
    /// over a live secret fails `SecretExists`; a revoked slot is writable.
    pub fn store_secret(
        env: Env,
        caller: Address,
        vault_id: u64,
        content_id: String,
        content_hash: BytesN<32>,
    ) -> Result<(), SecretError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| SecretError::Paused)?;

        if content_id.len() == 0 {
            return Err(SecretError::InvalidInput);
        }

        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(SecretError::NotInitialized)?;
        let vault = vault_registry::VaultRegistryContractClient::new(&env, &registry)
            .find_vault(&vault_id)
            .ok_or(SecretError::VaultNotFound)?;
        if vault.status.is_terminal() {
            return Err(SecretError::InvalidState);
        }

        if let Some(existing) = secret::load(&env, vault_id) {
            if !existing.revoked {
                return Err(SecretError::SecretExists);
            }
        }

        let record = SecretRecord {
            vault_id,
            content_id,
            content_hash: content_hash.clone(),
            depositor: caller.clone(),
            stored_at: env.ledger().timestamp(),
            revealed: false,
            revoked: false,
            released: false,
        };
        secret::store(&env, &record);

        events::publish_secret_stored(&env, vault_id, &caller, &content_hash);
        Ok(())
    }

    /// Withdraw the secret before it is ever revealed.  Vault-owner-only.
    pub fn revoke_secret(env: Env, caller: Address, vault_id: u64) -> Result<(), SecretError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| SecretError::Paused)?;

        let owner = Self::vault_owner(&env, vault_id)?;
        if owner != caller {
            return Err(SecretError::Unauthorized);
        }

        let mut record = secret::load(&env, vault_id).ok_or(SecretError::SecretNotFound)?;
        if record.revoked {
            return Err(SecretError::SecretRevoked);
        }
        if record.revealed {
            return Err(SecretError::AlreadyRevealed);
        }

        record.revoked = true;
        secret::store(&env, &record);

        events::publish_secret_revoked(&env, vault_id, &caller);
        Ok(())
    }

    // ── Disclosure ────────────────────────────────────────────────────────────

    /// Release the vault's secret for disclosure.  `REVEALER`-gated — in the
    /// deployed suite this is the unlock executor acting after a successful
    /// distribution.
    pub fn authorize_reveal(env: Env, caller: Address, vault_id: u64) -> Result<(), SecretError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| SecretError::Paused)?;
        roles::require_role(&env, roles::ROLE_REVEALER, &caller)
            .map_err(|_| SecretError::Unauthorized)?;

        let mut record = secret::load(&env, vault_id).ok_or(SecretError::SecretNotFound)?;
        if record.revoked {
            return Err(SecretError::SecretRevoked);
        }
        if record.released {
            return Ok(());
        }

        record.released = true;
        secret::store(&env, &record);

        events::publish_reveal_authorized(&env, vault_id, &caller);
        Ok(())
    }

    /// Hand out the content pointer.
    ///
    /// Callable by a `REVEALER` holder directly, or by anyone once the
    /// secret has been released.  Marks the record revealed.
    pub fn reveal_secret(env: Env, caller: Address, vault_id: u64) -> Result<String, SecretError> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        pausable::require_not_paused(&env).map_err(|_| SecretError::Paused)?;

        let mut record = secret::load(&env, vault_id).ok_or(SecretError::SecretNotFound)?;
        if record.revoked {
            return Err(SecretError::SecretRevoked);
        }
        if !record.released && !roles::has_role(&env, roles::ROLE_REVEALER, &caller) {
            return Err(SecretError::NotReleased);
        }

        if !record.revealed {
            record.revealed = true;
            secret::store(&env, &record);
            events::publish_secret_revealed(&env, vault_id, &caller);
        }

        Ok(record.content_id)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Whether `content_hash` matches the active secret's commitment.
    pub fn verify_secret(env: Env, vault_id: u64, content_hash: BytesN<32>) -> bool {
        secret::load(&env, vault_id)
            .map(|r| !r.revoked && r.content_hash == content_hash)
            .unwrap_or(false)
    }

    /// Whether the vault has a live (non-revoked) secret.
    pub fn has_secret(env: Env, vault_id: u64) -> bool {
        secret::load(&env, vault_id)
            .map(|r| !r.revoked)
            .unwrap_or(false)
    }

    pub fn get_secret_record(env: Env, vault_id: u64) -> Result<SecretRecord, SecretError> {
        secret::load(&env, vault_id).ok_or(SecretError::SecretNotFound)
    }

    // ── Administration ────────────────────────────────────────────────────────

    pub fn grant_revealer(env: Env, admin: Address, who: Address) -> Result<(), SecretError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::grant_role(&env, roles::ROLE_REVEALER, &who);
        Ok(())
    }

    pub fn revoke_revealer(env: Env, admin: Address, who: Address) -> Result<(), SecretError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        roles::revoke_role(&env, roles::ROLE_REVEALER, &who);
        Ok(())
    }

    pub fn is_revealer(env: Env, who: Address) -> bool {
        roles::has_role(&env, roles::ROLE_REVEALER, &who)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), SecretError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::pause(&env, &admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), SecretError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        pausable::unpause(&env, &admin);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn vault_owner(env: &Env, vault_id: u64) -> Result<Address, SecretError> {
        let registry: Address = env
            .storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(SecretError::NotInitialized)?;
        vault_registry::VaultRegistryContractClient::new(env, &registry)
            .find_vault(&vault_id)
            .map(|v| v.owner)
            .ok_or(SecretError::VaultNotFound)
    }

    fn require_initialized(env: &Env) -> Result<(), SecretError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(SecretError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), SecretError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(SecretError::NotInitialized)?;
        if admin != *caller {
            return Err(SecretError::Unauthorized);
        }
        Ok(())
    }
}
