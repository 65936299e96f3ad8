//! Vault lifecycle status and protocol-wide constants.

use soroban_sdk::contracttype;

/// One day in seconds.
pub const ONE_DAY: u64 = 86_400;

/// Shortest allowed distance between vault creation and its unlock time.
pub const MIN_UNLOCK_DELAY: u64 = ONE_DAY;

/// Longest allowed distance between vault creation and its unlock time
/// (100 years).
pub const MAX_UNLOCK_WINDOW: u64 = 100 * 365 * ONE_DAY;

/// Basis-point denominator: 10_000 bps = 100%.
pub const PERCENTAGE_BASE: u32 = 10_000;

/// Upper bound on heirs per vault.
pub const MAX_HEIRS: u32 = 50;

/// Grace window added to a vault's inactivity period before `mark_inactive`
/// may succeed.  Deployments can override this at proof-of-life contract
/// initialization; 8 days is the protocol default.
pub const DEFAULT_GRACE_PERIOD: u64 = 8 * ONE_DAY;

/// Lifecycle status of a vault.
///
/// ```text
/// Active ──► Locked ──► Unlocked ──► Finalized
///    │          │           │
///    │          │           └──────► Finalized   (coordinator)
///    └──────────┴──────────────────► Cancelled   (owner close)
/// ```
///
/// `Finalized` and `Cancelled` are terminal — no transition leaves them.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultStatus {
    Active = 0,
    Locked = 1,
    Unlocked = 2,
    Finalized = 3,
    Cancelled = 4,
}

impl VaultStatus {
    /// Whether the vault can never change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VaultStatus::Finalized | VaultStatus::Cancelled)
    }

    /// Whether the given transition is permitted by the lifecycle machine.
    ///
    /// The lifecycle is driven only by the timelock scheduler (Locked,
    /// Unlocked), the unlock executor (Finalized) and the owner's close
    /// (Cancelled); this table is the single source of truth all of them
    /// consult via the registry.
    pub fn can_transition_to(&self, next: VaultStatus) -> bool {
        use VaultStatus::*;
        matches!(
            (self, next),
            (Active, Locked)
                | (Active, Unlocked)
                | (Locked, Unlocked)
                | (Active, Finalized)
                | (Locked, Finalized)
                | (Unlocked, Finalized)
                | (Active, Cancelled)
                | (Locked, Cancelled)
        )
    }
}
