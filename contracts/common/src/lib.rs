//! Shared utilities and error types for the Heritage vault contract suite.
//!
//! This crate provides:
//! - [`vault_types`] — the vault lifecycle status enum and protocol constants.
//! - [`roles`] — the persistent role table used for privileged
//!   cross-contract authorization.
//! - [`pausable`] — a pause guard for state-mutating entry points.
//!
//! Contract-specific error enums start their codes at **1** per contract;
//! [`CommonError`] codes live in the 90+ range so the shared guards can be
//! mapped into any contract's error space without collisions.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]

use soroban_sdk::contracterror;

pub mod pausable;
pub mod roles;
pub mod vault_types;

pub use vault_types::*;

/// Errors raised by the shared guard modules.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CommonError {
    Paused = 90,
    RoleMissing = 91,
}
