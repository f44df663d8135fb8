//! # Nonce-based Replay Protection
//!
//! Per-sender strictly-monotonic nonces for relayed operations. Each sender
//! maintains an independent counter in persistent storage. A relayed message
//! is only accepted when its nonce equals the current expected value; on
//! success the counter is atomically incremented, so a captured message can
//! never be replayed.

use soroban_sdk::{contracttype, Address, Env};

use crate::CommonError;

// ── Storage key ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum NonceKey {
    Nonce(Address),
}

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Internal helpers ─────────────────────────────────────────────────────────

fn load_nonce(env: &Env, sender: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&NonceKey::Nonce(sender.clone()))
        .unwrap_or(0u64)
}

fn store_nonce(env: &Env, sender: &Address, value: u64) {
    let key = NonceKey::Nonce(sender.clone());
    env.storage().persistent().set(&key, &value);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Return the nonce a sender must embed in their next relayed operation.
///
/// New senders always start at `0`.
pub fn expected_nonce(env: &Env, sender: &Address) -> u64 {
    load_nonce(env, sender)
}

/// Accept `nonce` for `sender` and advance the counter.
///
/// Returns [`CommonError::NonceMismatch`] when the supplied nonce is not the
/// expected value (stale or replayed), and [`CommonError::NonceOverflow`]
/// if the counter would exceed `u64::MAX`.
pub fn consume_nonce(env: &Env, sender: &Address, nonce: u64) -> Result<(), CommonError> {
    let expected = load_nonce(env, sender);
    if nonce != expected {
        return Err(CommonError::NonceMismatch);
    }
    let next = expected.checked_add(1).ok_or(CommonError::NonceOverflow)?;
    store_nonce(env, sender, next);
    Ok(())
}
