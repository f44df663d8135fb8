//! One-way commitments for prescription verification codes.
//!
//! The contract stores only the sha256 hash of a verification code; the
//! plaintext code travels off-chain (QR distribution) and is presented by
//! the fulfilling pharmacy. Both sides build the code from the same
//! canonical preimage, so the commitment can be recomputed by the
//! off-chain distributor without any extra state.

use soroban_sdk::{Bytes, BytesN, Env};

/// Domain separator for verification-code preimages.
const CODE_DOMAIN: &[u8] = b"carechain_rx_code_v1";

/// Builds the canonical verification-code preimage for a prescription.
///
/// Preimage format: "carechain_rx_code_v1" || prescription_id(8 BE)
///                  || doctor_xdr || issued_at(8 BE)
///
/// `doctor_xdr` is the XDR serialisation of the reviewing doctor's address.
pub fn build_code_preimage(
    env: &Env,
    prescription_id: u64,
    doctor_xdr: &Bytes,
    issued_at: u64,
) -> Bytes {
    let mut preimage = Bytes::new(env);
    preimage.append(&Bytes::from_slice(env, CODE_DOMAIN));
    preimage.append(&Bytes::from_slice(env, &prescription_id.to_be_bytes()));
    preimage.append(doctor_xdr);
    preimage.append(&Bytes::from_slice(env, &issued_at.to_be_bytes()));
    preimage
}

/// Hashes a verification code into the commitment the contract stores.
pub fn code_commitment(env: &Env, code: &Bytes) -> BytesN<32> {
    env.crypto().sha256(code).to_bytes()
}
