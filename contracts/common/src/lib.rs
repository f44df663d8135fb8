//! Shared primitives for the CareChain contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by the cross-cutting helpers.
//! - [`nonce`]: per-sender replay protection for relayed operations.
//! - [`meta_tx`]: canonical message building and ed25519 verification for
//!   the meta-transaction relay.
//! - [`commit`]: one-way commitments for prescription verification codes.
//!
//! Errors from these helpers never cross a contract boundary directly;
//! each contract maps them into its own error enum before returning.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod commit;
pub mod meta_tx;
pub mod nonce;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the cross-cutting helper modules.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// The supplied nonce does not match the sender's expected value.
    NonceMismatch = 1,

    /// The per-sender nonce counter would overflow `u64::MAX`.
    NonceOverflow = 2,
}
