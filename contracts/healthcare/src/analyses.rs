//! AI symptom analyses.
//!
//! A patient submits free-text symptoms; the off-chain inference
//! collaborator records the analysis content hash (once), and a doctor
//! flags the analysis as clinician-reviewed. The contract never
//! interprets any of it.

use soroban_sdk::{Address, Bytes, Env, String};

use crate::errors::ContractError;
use crate::rbac::{self, Role};
use crate::types::SymptomAnalysis;
use crate::{events, registry, rewards, storage, validation};

/// Submits a symptom analysis for `patient`. Data-producing action, so it
/// fires the implicit reward trigger.
pub fn submit(env: &Env, patient: &Address, symptoms: String) -> Result<u64, ContractError> {
    registry::require_registered_patient(env, patient)?;
    validation::validate_text(&symptoms)?;

    let id = storage::next_analysis_id(env);
    let record = SymptomAnalysis {
        id,
        patient: patient.clone(),
        symptoms,
        analysis_hash: Bytes::new(env),
        reviewed: false,
        submitted_at: env.ledger().timestamp(),
    };
    storage::set_analysis(env, &record);

    events::publish_analysis_submitted(env, id, patient.clone());

    rewards::try_trigger(env, patient);

    Ok(id)
}

/// Records the inference result hash. Admin-gated (the oracle identity);
/// the hash is set exactly once.
pub fn record_result(
    env: &Env,
    caller: &Address,
    id: u64,
    analysis_hash: Bytes,
) -> Result<(), ContractError> {
    validation::validate_content_hash(&analysis_hash)?;

    let mut record = storage::analysis(env, id)?;
    if !record.analysis_hash.is_empty() {
        return Err(ContractError::AlreadyRecorded);
    }
    record.analysis_hash = analysis_hash;
    storage::set_analysis(env, &record);

    events::publish_analysis_result_recorded(env, id, caller.clone());
    Ok(())
}

/// Flags an analysis as reviewed by a verified doctor.
pub fn mark_reviewed(env: &Env, doctor: &Address, id: u64) -> Result<(), ContractError> {
    rbac::require_role(env, doctor, &Role::Doctor)?;
    registry::require_verified_doctor(env, doctor)?;

    let mut record = storage::analysis(env, id)?;
    if record.reviewed {
        return Err(ContractError::InvalidStatus);
    }
    record.reviewed = true;
    storage::set_analysis(env, &record);

    events::publish_analysis_reviewed(env, id, doctor.clone());
    Ok(())
}
