//! Canonical message construction and signature verification for the
//! meta-transaction relay.
//!
//! A relayed operation is signed off-chain by the sender over a canonical
//! byte string; the relay submits the operation together with the sender's
//! ed25519 public key and the signature, and the contract verifies both
//! before dispatching.

use soroban_sdk::{Bytes, BytesN, Env};

/// Domain separator prepended to every relayed-operation message.
const RELAY_DOMAIN: &[u8] = b"carechain_relay_v1";

/// Builds the canonical message for a relayed operation.
///
/// Message format: "carechain_relay_v1" || sender_pubkey(32) || call_xdr
///                 || nonce(8 BE) || expires_at(8 BE)
///
/// `call_xdr` is the XDR serialisation of the embedded call payload, which
/// pins the signature to the exact operation being relayed.
pub fn build_relayed_message(
    env: &Env,
    sender_pubkey: &BytesN<32>,
    call_xdr: &Bytes,
    nonce: u64,
    expires_at: u64,
) -> Bytes {
    let mut msg = Bytes::new(env);
    msg.append(&Bytes::from_slice(env, RELAY_DOMAIN));
    msg.append(&Bytes::from_slice(env, &sender_pubkey.to_array()));
    msg.append(call_xdr);
    msg.append(&Bytes::from_slice(env, &nonce.to_be_bytes()));
    msg.append(&Bytes::from_slice(env, &expires_at.to_be_bytes()));
    msg
}

/// Verifies an ed25519 signature over a relayed-operation message.
///
/// Panics if the signature is invalid (Soroban host behavior).
pub fn verify_relay_signature(
    env: &Env,
    public_key: &BytesN<32>,
    message: &Bytes,
    signature: &BytesN<64>,
) {
    env.crypto().ed25519_verify(public_key, message, signature);
}
