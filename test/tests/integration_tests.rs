//! # Heritage Suite — Integration Tests
//!
//! Cross-contract scenarios exercising the full deployment:
//! - End-to-end inheritance flows over all three unlock paths
//! - Multi-vault isolation and access control
//! - Property-based tests for share splits and exactly-once execution

extern crate std;

use proptest::prelude::*;
use soroban_sdk::String;

use test_framework::generators::*;
use test_framework::*;

// ═════════════════════════════════════════════════════════════════════════════
//  End-to-End Flows
// ═════════════════════════════════════════════════════════════════════════════

/// The canonical estate flow: a time-locked vault with a 60/40 split and a
/// deposited secret, executed after the unlock date by a third party.
#[test]
fn timelock_flow_distributes_estate_and_reveals_secret() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, unlock_time) = s.timelock_vault(30 * ONE_DAY);
    let heirs = s.policy_with_shares(&owner, vault_id, &[6_000, 4_000]);
    let cid = s.deposit_secret(&owner, vault_id);

    assert_eq!(
        s.registry.get_vault(&vault_id).status,
        VaultStatus::Locked
    );
    assert!(!s.executor.can_execute(&vault_id));

    s.set_timestamp(unlock_time + 1);
    assert!(s.executor.can_execute(&vault_id));

    let keeper = s.generate_address();
    s.executor.execute_unlock(&keeper, &vault_id);

    assert_eq!(
        s.registry.get_vault(&vault_id).status,
        VaultStatus::Finalized
    );
    for entry in s.policy.get_heirs(&vault_id).iter() {
        assert!(entry.claimed);
    }
    // The released secret is now fetchable by each heir.
    for heir in &heirs {
        assert_eq!(s.secrets.reveal_secret(heir, &vault_id), cid);
    }
    s.assert_vault_consistent(vault_id);
}

/// Proof-of-life flow: monthly check-ins keep the vault sealed; after the
/// owner falls silent past period + grace, anyone can mark the vault
/// inactive and execute.
#[test]
fn proof_of_life_flow_unlocks_after_prolonged_silence() {
    let s = HeritageSuite::deploy();
    let period = 90 * ONE_DAY;
    let (owner, vault_id) = s.monitored_vault(period);
    s.policy_with_shares(&owner, vault_id, &[5_000, 3_000, 2_000]);

    // Two years of monthly check-ins.
    for month in 1..=24u64 {
        s.set_timestamp(month * 30 * ONE_DAY);
        s.monitor.check_in(&owner, &vault_id);
        assert!(s.monitor.is_active(&vault_id));
        assert!(!s.executor.can_execute(&vault_id));
    }

    // Then silence past the inactivity period plus grace.
    let last = s.monitor.get_last_check_in(&vault_id);
    s.set_timestamp(last + period + DEFAULT_GRACE_PERIOD + 1);

    let keeper = s.generate_address();
    s.monitor.mark_inactive(&keeper, &vault_id);
    assert!(s.monitor.is_marked_inactive(&vault_id));

    s.executor.execute_unlock(&keeper, &vault_id);
    assert_eq!(
        s.registry.get_vault(&vault_id).status,
        VaultStatus::Finalized
    );
    s.assert_vault_consistent(vault_id);
}

/// The scheduler's trigger and the executor compose: triggering first moves
/// the vault to Unlocked, and execution then finalizes it from there.  Also
/// holds when the vault was created without time flags and the schedule was
/// added afterwards.
#[test]
fn trigger_then_execute_finalizes_unlocked_vault() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id) = s.monitored_vault(90 * ONE_DAY);
    s.policy_with_shares(&owner, vault_id, &[6_000, 4_000]);

    let unlock_time = s.timestamp() + 30 * ONE_DAY;
    s.timelock
        .schedule_unlock(&owner, &vault_id, &unlock_time, &0);
    s.set_timestamp(unlock_time + 1);

    let keeper = s.generate_address();
    s.timelock.trigger_unlock(&keeper, &vault_id);
    assert_eq!(
        s.registry.get_vault(&vault_id).status,
        VaultStatus::Unlocked
    );

    assert!(s.executor.can_execute(&vault_id));
    s.executor.execute_unlock(&keeper, &vault_id);
    assert_eq!(
        s.registry.get_vault(&vault_id).status,
        VaultStatus::Finalized
    );
    s.assert_vault_consistent(vault_id);
}

/// Oracle flow: execution is gated on the bound oracle's attestation.
#[test]
fn oracle_flow_unlocks_on_attestation() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, oracle, condition_id) = s.oracle_vault();
    s.policy_with_shares(&owner, vault_id, &[10_000]);

    assert!(!s.executor.can_execute(&vault_id));

    let data = soroban_sdk::Bytes::from_slice(&s.env, b"probate-ruling");
    s.bridge
        .fulfill_condition(&oracle, &vault_id, &condition_id, &data);

    let keeper = s.generate_address();
    s.executor.execute_unlock(&keeper, &vault_id);
    assert_eq!(
        s.executor.get_execution_status(&vault_id).executed_by,
        Some(keeper)
    );
    s.assert_vault_consistent(vault_id);
}

/// A living owner can always pull the plug: cancellation beats readiness.
#[test]
fn cancellation_blocks_distribution() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, unlock_time) = s.timelock_vault(30 * ONE_DAY);
    s.policy_with_shares(&owner, vault_id, &[10_000]);

    s.set_timestamp(unlock_time + 1);
    assert!(s.executor.can_execute(&vault_id));

    s.registry.close_vault(&owner, &vault_id);
    assert!(!s.executor.can_execute(&vault_id));
    assert!(s
        .executor
        .try_execute_unlock(&s.generate_address(), &vault_id)
        .is_err());
    s.assert_vault_consistent(vault_id);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Isolation & Access Control
// ═════════════════════════════════════════════════════════════════════════════

/// State of one vault never leaks into another.
#[test]
fn vaults_are_isolated() {
    let s = HeritageSuite::deploy();
    let (owner_a, vault_a, unlock_a) = s.timelock_vault(10 * ONE_DAY);
    let (owner_b, vault_b, _) = s.timelock_vault(40 * ONE_DAY);
    s.policy_with_shares(&owner_a, vault_a, &[10_000]);
    s.policy_with_shares(&owner_b, vault_b, &[7_500, 2_500]);

    s.set_timestamp(unlock_a + 1);
    s.executor.execute_unlock(&s.generate_address(), &vault_a);

    assert_eq!(
        s.registry.get_vault(&vault_a).status,
        VaultStatus::Finalized
    );
    assert_eq!(s.registry.get_vault(&vault_b).status, VaultStatus::Locked);
    assert!(!s.executor.get_execution_status(&vault_b).executed);
    for entry in s.policy.get_heirs(&vault_b).iter() {
        assert!(!entry.claimed);
    }
    s.assert_vault_consistent(vault_a);
    s.assert_vault_consistent(vault_b);
}

/// Strangers cannot exercise any owner- or role-gated entry point.
#[test]
fn strangers_are_rejected_everywhere() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, _) = s.timelock_vault(30 * ONE_DAY);
    s.policy_with_shares(&owner, vault_id, &[10_000]);
    s.deposit_secret(&owner, vault_id);
    let stranger = s.generate_address();

    assert!(s.registry.try_close_vault(&stranger, &vault_id).is_err());
    assert!(s
        .timelock
        .try_schedule_unlock(&stranger, &vault_id, &(s.timestamp() + 60 * ONE_DAY), &0)
        .is_err());
    assert!(s
        .policy
        .try_add_heir(&stranger, &vault_id, &s.generate_address(), &1)
        .is_err());
    assert!(s
        .policy
        .try_mark_claimed(&stranger, &vault_id, &s.generate_address())
        .is_err());
    assert!(s.secrets.try_revoke_secret(&stranger, &vault_id).is_err());
    assert!(s
        .secrets
        .try_authorize_reveal(&stranger, &vault_id)
        .is_err());
    assert!(s.secrets.try_reveal_secret(&stranger, &vault_id).is_err());
    assert!(s
        .bridge
        .try_add_trusted_oracle(&stranger, &s.generate_address())
        .is_err());
    assert!(s.registry.try_pause(&stranger).is_err());
}

/// Admin pause freezes mutations suite-wide while views stay live.
#[test]
fn pause_freezes_mutations_but_not_views() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, unlock_time) = s.timelock_vault(30 * ONE_DAY);
    s.policy_with_shares(&owner, vault_id, &[10_000]);
    s.set_timestamp(unlock_time + 1);

    s.executor.pause(&s.admin);
    assert!(s
        .executor
        .try_execute_unlock(&s.generate_address(), &vault_id)
        .is_err());
    // Readiness stays observable.
    assert!(s.executor.can_execute(&vault_id));

    s.executor.unpause(&s.admin);
    s.executor.execute_unlock(&s.generate_address(), &vault_id);
}

/// Owner listings track creation order.
#[test]
fn owner_index_tracks_vaults() {
    let s = HeritageSuite::deploy();
    let owner = s.generate_address();
    let t = s.timestamp() + 30 * ONE_DAY;
    let a = s.registry.create_vault(&owner, &t, &0, &false, &false);
    let b = s.registry.create_vault(&owner, &0, &0, &true, &false);

    let ids = s.registry.get_vaults_by_owner(&owner);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids.get(0), Some(a));
    assert_eq!(ids.get(1), Some(b));
    assert_eq!(s.registry.get_vault_count(), 2);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// **Property**: every exact-sum split is accepted and validates.
    #[test]
    fn prop_exact_splits_accepted(split in share_split_strategy()) {
        let s = HeritageSuite::deploy();
        let (owner, vault_id, _) = s.timelock_vault(30 * ONE_DAY);

        s.policy_with_shares(&owner, vault_id, &split);
        prop_assert!(s.policy.validate_distribution(&vault_id));
        s.assert_vault_consistent(vault_id);
    }

    /// **Property**: any split missing the exact total is rejected.
    #[test]
    fn prop_broken_splits_rejected(split in broken_share_split_strategy()) {
        let s = HeritageSuite::deploy();
        let (owner, vault_id, _) = s.timelock_vault(30 * ONE_DAY);

        let mut heirs = soroban_sdk::Vec::new(&s.env);
        let mut shares = soroban_sdk::Vec::new(&s.env);
        for share in &split {
            heirs.push_back(s.generate_address());
            shares.push_back(*share);
        }
        let result = s
            .policy
            .try_set_heir_policy(&owner, &vault_id, &heirs, &shares, &0);
        prop_assert!(result.is_err());
        prop_assert!(!s.policy.validate_distribution(&vault_id));
    }

    /// **Property**: execution happens exactly once at any legal delay.
    #[test]
    fn prop_execution_exactly_once(delay in ONE_DAY..=3_650 * ONE_DAY) {
        let s = HeritageSuite::deploy();
        let (owner, vault_id, unlock_time) = s.timelock_vault(delay);
        s.policy_with_shares(&owner, vault_id, &[10_000]);

        s.set_timestamp(unlock_time);
        let keeper = s.generate_address();
        s.executor.execute_unlock(&keeper, &vault_id);
        prop_assert!(s.executor.try_execute_unlock(&keeper, &vault_id).is_err());
        prop_assert!(!s.executor.can_execute(&vault_id));
        s.assert_vault_consistent(vault_id);
    }

    /// **Property**: a monitored owner who checks in within the period is
    /// never executable, regardless of the period chosen.
    #[test]
    fn prop_checked_in_owner_stays_sealed(period in inactivity_period_strategy()) {
        let s = HeritageSuite::deploy();
        let (owner, vault_id) = s.monitored_vault(period);
        s.policy_with_shares(&owner, vault_id, &[10_000]);

        s.set_timestamp(period); // exactly at the boundary, still live
        s.monitor.check_in(&owner, &vault_id);
        prop_assert!(s.monitor.is_active(&vault_id));
        prop_assert!(s.monitor.try_mark_inactive(&owner, &vault_id).is_err());
        prop_assert!(!s.executor.can_execute(&vault_id));
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Regression Details
// ═════════════════════════════════════════════════════════════════════════════

/// The secret pointer handed to heirs must be byte-exact.
#[test]
fn revealed_pointer_is_byte_exact() {
    let s = HeritageSuite::deploy();
    let (owner, vault_id, unlock_time) = s.timelock_vault(30 * ONE_DAY);
    s.policy_with_shares(&owner, vault_id, &[10_000]);
    let cid = s.deposit_secret(&owner, vault_id);

    s.set_timestamp(unlock_time + 1);
    s.executor.execute_unlock(&s.generate_address(), &vault_id);

    let heir = s.generate_address();
    let revealed = s.secrets.reveal_secret(&heir, &vault_id);
    assert_eq!(revealed, cid);
    assert_eq!(
        revealed,
        String::from_str(&s.env, "QmXoypizjW3WknFiJnKLwHCnL72vedxjQkDDP1mXWo6uco")
    );
}

/// A vault with no unlock mechanism at all is rejected at creation.
#[test]
fn mechanismless_vault_is_rejected() {
    let s = HeritageSuite::deploy();
    let owner = s.generate_address();
    let result = s.registry.try_create_vault(&owner, &0, &0, &false, &false);
    assert!(result.is_err());
}
