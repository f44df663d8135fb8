//! Input validation for opaque blobs and workflow parameters.
//!
//! Content hashes, encrypted keys, and licenses are opaque byte sequences:
//! the contract only checks that they are present and within sane bounds,
//! never their structure.

use soroban_sdk::{Bytes, Env, String};

use crate::errors::ContractError;

/// Upper bound for opaque blobs so a caller cannot bloat storage.
const MAX_BLOB_LEN: u32 = 256;

pub fn validate_content_hash(hash: &Bytes) -> Result<(), ContractError> {
    if hash.is_empty() || hash.len() > MAX_BLOB_LEN {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_encrypted_key(blob: &Bytes) -> Result<(), ContractError> {
    if blob.is_empty() || blob.len() > MAX_BLOB_LEN {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_license(license: &String) -> Result<(), ContractError> {
    if license.is_empty() || license.len() > MAX_BLOB_LEN {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_text(text: &String) -> Result<(), ContractError> {
    if text.is_empty() {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

pub fn validate_fee(fee: i128) -> Result<(), ContractError> {
    if fee <= 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Booking lead time: the requested slot must be at least `lead_time`
/// seconds in the future.
pub fn validate_lead_time(env: &Env, scheduled_at: u64, lead_time: u64) -> Result<(), ContractError> {
    let earliest = env.ledger().timestamp().saturating_add(lead_time);
    if scheduled_at < earliest {
        return Err(ContractError::AppointmentTooSoon);
    }
    Ok(())
}
