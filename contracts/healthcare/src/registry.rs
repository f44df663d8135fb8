//! Participant registration and verification.
//!
//! Patients self-register and receive the Patient role as a side effect;
//! doctors, lab technicians, and pharmacies are onboarded by the admin
//! with idempotent overwrite semantics (re-verification updates the
//! license or fee and re-grants the role, it never fails as a duplicate).

use soroban_sdk::{Address, Bytes, Env, String};

use crate::errors::ContractError;
use crate::rbac::{self, Role};
use crate::types::{DoctorRecord, LabTechRecord, PatientRecord, PharmacyRecord};
use crate::{events, storage, validation};

/// Fails unless `address` has a patient record. A record with the role
/// revoked afterwards still fails the role check at the entry point.
pub fn require_registered_patient(
    env: &Env,
    address: &Address,
) -> Result<PatientRecord, ContractError> {
    storage::patient(env, address).ok_or(ContractError::PatientNotRegistered)
}

pub fn require_verified_doctor(env: &Env, address: &Address) -> Result<DoctorRecord, ContractError> {
    match storage::doctor(env, address) {
        Some(record) if record.verified => Ok(record),
        _ => Err(ContractError::DoctorNotVerified),
    }
}

pub fn require_verified_lab_tech(
    env: &Env,
    address: &Address,
) -> Result<LabTechRecord, ContractError> {
    match storage::lab_technician(env, address) {
        Some(record) if record.verified => Ok(record),
        _ => Err(ContractError::LabTechNotVerified),
    }
}

pub fn require_registered_pharmacy(
    env: &Env,
    address: &Address,
) -> Result<PharmacyRecord, ContractError> {
    match storage::pharmacy(env, address) {
        Some(record) if record.registered => Ok(record),
        _ => Err(ContractError::PharmacyNotRegistered),
    }
}

/// Creates a patient record for `caller` and grants the Patient role.
///
/// Data sharing starts disabled and gamification at baseline; a second
/// registration from the same identity fails with `AlreadyRegistered`.
pub fn register_patient(
    env: &Env,
    caller: &Address,
    encrypted_key: Bytes,
) -> Result<(), ContractError> {
    validation::validate_encrypted_key(&encrypted_key)?;

    if storage::patient(env, caller).is_some() {
        return Err(ContractError::AlreadyRegistered);
    }

    let record = PatientRecord {
        address: caller.clone(),
        encrypted_key,
        medical_history_hash: Bytes::new(env),
        points: 0,
        level: 1,
        data_sharing: false,
        last_reward_at: 0,
        registered_at: env.ledger().timestamp(),
    };
    storage::set_patient(env, &record);
    rbac::grant_role(env, caller, &Role::Patient);

    events::publish_role_granted(env, caller.clone(), Role::Patient);
    events::publish_patient_registered(env, caller.clone());

    Ok(())
}

/// Replaces the patient's medical history content hash. The blob is
/// opaque; only presence and size are checked.
pub fn update_medical_history(
    env: &Env,
    patient: &Address,
    history_hash: Bytes,
) -> Result<(), ContractError> {
    validation::validate_content_hash(&history_hash)?;

    let mut record = require_registered_patient(env, patient)?;
    record.medical_history_hash = history_hash;
    storage::set_patient(env, &record);

    Ok(())
}

/// Flips the data-sharing flag.
///
/// Enabling stamps `last_reward_at` so the first payout is earned a full
/// cooldown window after enabling, never instantly.
pub fn set_data_sharing(env: &Env, patient: &Address, enabled: bool) -> Result<(), ContractError> {
    let mut record = require_registered_patient(env, patient)?;

    if enabled && !record.data_sharing {
        record.last_reward_at = env.ledger().timestamp();
    }
    record.data_sharing = enabled;
    storage::set_patient(env, &record);

    events::publish_data_sharing_set(env, patient.clone(), enabled);

    Ok(())
}

/// Admin onboarding of a doctor. Idempotent overwrite: re-calling updates
/// the license and fee and re-grants the role.
pub fn verify_doctor(
    env: &Env,
    doctor: &Address,
    license: String,
    fee: i128,
) -> Result<(), ContractError> {
    validation::validate_license(&license)?;
    validation::validate_fee(fee)?;

    let record = DoctorRecord {
        address: doctor.clone(),
        license,
        fee,
        verified: true,
        verified_at: env.ledger().timestamp(),
    };
    storage::set_doctor(env, &record);
    rbac::grant_role(env, doctor, &Role::Doctor);

    events::publish_role_granted(env, doctor.clone(), Role::Doctor);
    events::publish_doctor_verified(env, doctor.clone(), fee);

    Ok(())
}

/// Admin onboarding of a lab technician. Idempotent overwrite.
pub fn verify_lab_technician(
    env: &Env,
    technician: &Address,
    license: String,
) -> Result<(), ContractError> {
    validation::validate_license(&license)?;

    let record = LabTechRecord {
        address: technician.clone(),
        license,
        verified: true,
    };
    storage::set_lab_technician(env, &record);
    rbac::grant_role(env, technician, &Role::LabTech);

    events::publish_role_granted(env, technician.clone(), Role::LabTech);
    events::publish_lab_technician_verified(env, technician.clone());

    Ok(())
}

/// Admin onboarding of a pharmacy. Idempotent overwrite.
pub fn register_pharmacy(
    env: &Env,
    pharmacy: &Address,
    license: String,
) -> Result<(), ContractError> {
    validation::validate_license(&license)?;

    let record = PharmacyRecord {
        address: pharmacy.clone(),
        license,
        registered: true,
    };
    storage::set_pharmacy(env, &record);
    rbac::grant_role(env, pharmacy, &Role::Pharmacy);

    events::publish_role_granted(env, pharmacy.clone(), Role::Pharmacy);
    events::publish_pharmacy_registered(env, pharmacy.clone());

    Ok(())
}

/// Adds gamification points and recomputes the level.
pub fn award_points(env: &Env, patient: &Address, points: u32) -> Result<(), ContractError> {
    let mut record = require_registered_patient(env, patient)?;
    record.points = record.points.saturating_add(points);
    record.level = record.points / crate::POINTS_PER_LEVEL + 1;
    storage::set_patient(env, &record);
    Ok(())
}
