//! # Heritage Contract Testing Framework
//!
//! Cross-contract harness for the inheritance suite: deploys all seven
//! contracts against one `Env`, wires the role grants the way the deployment
//! scripts do, and exposes scenario builders so integration and property
//! tests read as intent rather than plumbing.
//!
//! ```text
//! test/framework/
//! ├── mod.rs          — HeritageSuite deployment + scenario builders
//! └── generators.rs   — Property-based test value generators
//! ```

extern crate std;

pub mod generators;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env, String, Vec,
};

use heir_policy::{HeirPolicyContract, HeirPolicyContractClient};
use oracle_bridge::{OracleBridgeContract, OracleBridgeContractClient};
use proof_of_life::{ProofOfLifeContract, ProofOfLifeContractClient};
use secret_vault::{SecretVaultContract, SecretVaultContractClient};
use timelock_vault::{TimelockVaultContract, TimelockVaultContractClient};
use unlock_executor::{UnlockExecutorContract, UnlockExecutorContractClient};
use vault_registry::{VaultRegistryContract, VaultRegistryContractClient};

pub use common::{VaultStatus, DEFAULT_GRACE_PERIOD, MAX_HEIRS, ONE_DAY, PERCENTAGE_BASE};

// ── Suite deployment ─────────────────────────────────────────────────────────

/// The full contract suite on one ledger, role-wired and ready.
pub struct HeritageSuite {
    pub env: Env,
    pub admin: Address,
    pub registry: VaultRegistryContractClient<'static>,
    pub policy: HeirPolicyContractClient<'static>,
    pub timelock: TimelockVaultContractClient<'static>,
    pub monitor: ProofOfLifeContractClient<'static>,
    pub bridge: OracleBridgeContractClient<'static>,
    pub secrets: SecretVaultContractClient<'static>,
    pub executor: UnlockExecutorContractClient<'static>,
}

impl HeritageSuite {
    /// Deploy every contract, initialize them against a shared registry, and
    /// grant the cross-contract roles: the scheduler and executor may drive
    /// vault status, the executor alone marks claims and releases secrets.
    pub fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        let admin = Address::generate(&env);

        let registry_id = env.register(VaultRegistryContract, ());
        let registry = VaultRegistryContractClient::new(&env, &registry_id);
        registry.initialize(&admin);

        let policy_id = env.register(HeirPolicyContract, ());
        let policy = HeirPolicyContractClient::new(&env, &policy_id);
        policy.initialize(&admin, &registry_id);

        let timelock_id = env.register(TimelockVaultContract, ());
        let timelock = TimelockVaultContractClient::new(&env, &timelock_id);
        timelock.initialize(&admin, &registry_id);

        let monitor_id = env.register(ProofOfLifeContract, ());
        let monitor = ProofOfLifeContractClient::new(&env, &monitor_id);
        monitor.initialize(&admin, &registry_id, &None);

        let bridge_id = env.register(OracleBridgeContract, ());
        let bridge = OracleBridgeContractClient::new(&env, &bridge_id);
        bridge.initialize(&admin, &registry_id);

        let secrets_id = env.register(SecretVaultContract, ());
        let secrets = SecretVaultContractClient::new(&env, &secrets_id);
        secrets.initialize(&admin, &registry_id);

        let executor_id = env.register(UnlockExecutorContract, ());
        let executor = UnlockExecutorContractClient::new(&env, &executor_id);
        executor.initialize(
            &admin,
            &registry_id,
            &policy_id,
            &timelock_id,
            &monitor_id,
            &bridge_id,
            &secrets_id,
        );

        registry.grant_vault_manager(&admin, &timelock_id);
        registry.grant_vault_manager(&admin, &executor_id);
        policy.grant_executor(&admin, &executor_id);
        secrets.grant_revealer(&admin, &executor_id);

        Self {
            env,
            admin,
            registry,
            policy,
            timelock,
            monitor,
            bridge,
            secrets,
            executor,
        }
    }

    // ── Time control ──────────────────────────────────────────────────────────

    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    // ── Scenario builders ─────────────────────────────────────────────────────

    /// Owner + time-locked vault scheduled `delay` seconds out.
    pub fn timelock_vault(&self, delay: u64) -> (Address, u64, u64) {
        let owner = self.generate_address();
        let unlock_time = self.timestamp() + delay;
        let vault_id = self
            .registry
            .create_vault(&owner, &unlock_time, &0, &false, &false);
        self.timelock
            .schedule_unlock(&owner, &vault_id, &unlock_time, &0);
        (owner, vault_id, unlock_time)
    }

    /// Owner + proof-of-life vault monitored with `inactivity_period`.
    pub fn monitored_vault(&self, inactivity_period: u64) -> (Address, u64) {
        let owner = self.generate_address();
        let vault_id = self.registry.create_vault(&owner, &0, &0, &true, &false);
        self.monitor
            .init_monitor(&owner, &vault_id, &owner, &inactivity_period);
        (owner, vault_id)
    }

    /// Owner + oracle-conditioned vault bound to a fresh trusted oracle.
    pub fn oracle_vault(&self) -> (Address, u64, Address, BytesN<32>) {
        let owner = self.generate_address();
        let vault_id = self.registry.create_vault(&owner, &0, &0, &false, &true);

        let oracle = self.generate_address();
        self.bridge.add_trusted_oracle(&self.admin, &oracle);
        let condition_id = BytesN::from_array(&self.env, &[0xAB; 32]);
        let data = Bytes::from_slice(&self.env, b"probate-ruling");
        self.bridge
            .set_oracle_condition(&owner, &vault_id, &oracle, &condition_id, &data);
        (owner, vault_id, oracle, condition_id)
    }

    /// Set a complete policy splitting the estate across `shares_bps` heirs.
    pub fn policy_with_shares(
        &self,
        owner: &Address,
        vault_id: u64,
        shares_bps: &[u32],
    ) -> std::vec::Vec<Address> {
        let mut heirs = Vec::new(&self.env);
        let mut out = std::vec::Vec::new();
        for _ in shares_bps {
            let heir = self.generate_address();
            heirs.push_back(heir.clone());
            out.push(heir);
        }
        let mut shares = Vec::new(&self.env);
        for s in shares_bps {
            shares.push_back(*s);
        }
        self.policy
            .set_heir_policy(owner, &vault_id, &heirs, &shares, &0);
        out
    }

    /// Deposit a secret under `vault_id` and return its content pointer.
    pub fn deposit_secret(&self, depositor: &Address, vault_id: u64) -> String {
        let cid = String::from_str(&self.env, "QmXoypizjW3WknFiJnKLwHCnL72vedxjQkDDP1mXWo6uco");
        let hash = BytesN::from_array(&self.env, &[0x5E; 32]);
        self.secrets.store_secret(depositor, &vault_id, &cid, &hash);
        cid
    }

    // ── Suite-wide checks ─────────────────────────────────────────────────────

    /// Every durable consistency rule the suite promises for one vault.
    /// Panics with a description on the first violation.
    pub fn assert_vault_consistent(&self, vault_id: u64) {
        let vault = self
            .registry
            .find_vault(&vault_id)
            .expect("vault must exist");

        let entries = self.policy.get_heirs(&vault_id);
        let mut total: u64 = 0;
        for entry in entries.iter() {
            total += entry.share_bps as u64;
        }
        assert!(
            total <= PERCENTAGE_BASE as u64,
            "heir shares exceed the percentage base: {total}"
        );

        let status = self.executor.get_execution_status(&vault_id);
        if status.executed {
            assert_eq!(
                vault.status,
                VaultStatus::Finalized,
                "executed vault must be Finalized"
            );
            for entry in entries.iter() {
                assert!(entry.claimed, "executed vault left an unclaimed heir");
            }
        }
        if vault.status.is_terminal() {
            assert!(
                !self.executor.can_execute(&vault_id),
                "terminal vault reports executable"
            );
        }
    }
}

impl Default for HeritageSuite {
    fn default() -> Self {
        Self::deploy()
    }
}
