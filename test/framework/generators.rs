//! Composable `proptest` strategies for generating valid and adversarial
//! inputs against the inheritance suite.

extern crate std;

use proptest::prelude::*;

use common::{MAX_UNLOCK_WINDOW, MIN_UNLOCK_DELAY, ONE_DAY, PERCENTAGE_BASE};

/// A complete share split: 1..=8 positive basis-point shares summing to
/// exactly `PERCENTAGE_BASE`.
pub fn share_split_strategy() -> impl Strategy<Value = std::vec::Vec<u32>> {
    (1usize..=8).prop_flat_map(|n| {
        proptest::collection::vec(1u32..PERCENTAGE_BASE, n).prop_map(|mut raw| {
            // Normalize to an exact total, folding the remainder into the
            // last share so every entry stays positive.
            let sum: u64 = raw.iter().map(|&s| s as u64).sum();
            let mut allocated = 0u32;
            let n = raw.len();
            for (i, share) in raw.iter_mut().enumerate() {
                if i == n - 1 {
                    *share = PERCENTAGE_BASE - allocated;
                } else {
                    let scaled = ((*share as u64 * PERCENTAGE_BASE as u64) / sum) as u32;
                    *share = scaled.max(1).min(PERCENTAGE_BASE - allocated - (n - 1 - i) as u32);
                    allocated += *share;
                }
            }
            raw
        })
    })
}

/// A share split that misses `PERCENTAGE_BASE` by at least one basis point.
pub fn broken_share_split_strategy() -> impl Strategy<Value = std::vec::Vec<u32>> {
    share_split_strategy().prop_flat_map(|split| {
        (0..split.len(), 1u32..=100).prop_map(move |(i, delta)| {
            let mut broken = split.clone();
            broken[i] += delta;
            broken
        })
    })
}

/// Scheduling delays inside the legal window.
pub fn unlock_delay_strategy() -> impl Strategy<Value = u64> {
    MIN_UNLOCK_DELAY..=MAX_UNLOCK_WINDOW
}

/// Inactivity periods from one day to two years.
pub fn inactivity_period_strategy() -> impl Strategy<Value = u64> {
    ONE_DAY..=730 * ONE_DAY
}
