//! Prescription state machine.
//!
//! Generated → Verified → Fulfilled. A prescription exists only as the
//! side effect of a lab-result review. The verification code is committed
//! as a sha256 hash; the plaintext travels off-chain and is presented by
//! the pharmacy at verification time.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, Env, String};

use crate::errors::ContractError;
use crate::rbac::{self, Role};
use crate::types::{Prescription, PrescriptionStatus};
use crate::{events, registry, storage};

/// Creates a Generated prescription for `patient`.
///
/// The code commitment binds the new identifier, the reviewing doctor,
/// and the issue time; the off-chain distributor rebuilds the same
/// preimage to render the plaintext code.
pub fn generate(
    env: &Env,
    patient: &Address,
    doctor: &Address,
    medication: String,
    details_hash: Bytes,
) -> Result<u64, ContractError> {
    let id = storage::next_prescription_id(env);
    let issued_at = env.ledger().timestamp();
    let expires_at = issued_at.saturating_add(crate::PRESCRIPTION_VALIDITY);

    let doctor_xdr = doctor.clone().to_xdr(env);
    let preimage = common::commit::build_code_preimage(env, id, &doctor_xdr, issued_at);
    let code_hash = common::commit::code_commitment(env, &preimage);

    let record = Prescription {
        id,
        patient: patient.clone(),
        doctor: doctor.clone(),
        code_hash,
        medication,
        details_hash,
        status: PrescriptionStatus::Generated,
        pharmacy: None,
        issued_at,
        expires_at,
    };
    storage::set_prescription(env, &record);

    events::publish_prescription_generated(env, id, patient.clone(), doctor.clone(), expires_at);

    Ok(id)
}

/// Generated → Verified. The pharmacy presents the plaintext code; its
/// hash must equal the stored commitment. Records the verifying pharmacy.
pub fn verify(
    env: &Env,
    pharmacy: &Address,
    id: u64,
    code: Bytes,
) -> Result<(), ContractError> {
    rbac::require_role(env, pharmacy, &Role::Pharmacy)?;
    registry::require_registered_pharmacy(env, pharmacy)?;

    let mut record = storage::prescription(env, id)?;
    if record.status != PrescriptionStatus::Generated {
        return Err(ContractError::InvalidStatus);
    }

    if common::commit::code_commitment(env, &code) != record.code_hash {
        return Err(ContractError::InvalidVerificationCode);
    }

    record.status = PrescriptionStatus::Verified;
    record.pharmacy = Some(pharmacy.clone());
    storage::set_prescription(env, &record);

    events::publish_prescription_verified(env, id, pharmacy.clone());
    Ok(())
}

/// Verified → Fulfilled, by the verifying pharmacy, before expiry.
pub fn fulfill(env: &Env, pharmacy: &Address, id: u64) -> Result<(), ContractError> {
    let mut record = storage::prescription(env, id)?;
    if record.status != PrescriptionStatus::Verified {
        return Err(ContractError::InvalidStatus);
    }
    if record.pharmacy != Some(pharmacy.clone()) {
        return Err(ContractError::Unauthorized);
    }
    if env.ledger().timestamp() >= record.expires_at {
        return Err(ContractError::PrescriptionExpired);
    }

    record.status = PrescriptionStatus::Fulfilled;
    storage::set_prescription(env, &record);

    events::publish_prescription_fulfilled(env, id, pharmacy.clone());
    Ok(())
}
