#![no_std]

//! Permissioned healthcare workflow contract.
//!
//! Governs five participant roles (Admin, Patient, Doctor, LabTech,
//! Pharmacy), the appointment / lab test / prescription lifecycles, a
//! three-asset payment path with withdrawal-style refunds, a time-gated
//! data-sharing reward, and a signed meta-transaction relay. Every
//! mutating entry point follows the same pipeline: authentication →
//! pause check → role check → record validation → settlement (where
//! applicable) → state transition → event.

#[cfg(test)]
extern crate std;

pub mod analyses;
pub mod appointments;
pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod payments;
pub mod prescriptions;
pub mod rbac;
pub mod reentrancy;
pub mod registry;
pub mod relay;
pub mod rewards;
pub mod storage;
pub mod types;
pub mod validation;

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Vec};

pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use rbac::Role;
pub use relay::{RelayedCall, RelayedOperation};
pub use storage::TokenConfig;
pub use types::{
    Appointment, AppointmentStatus, DoctorRecord, LabTechRecord, LabTestOrder, LabTestStatus,
    PatientRecord, PaymentAsset, PharmacyRecord, Prescription, PrescriptionStatus, SymptomAnalysis,
};

// ── Workflow constants ───────────────────────────────────────────────────────

/// Minimum lead time between booking and the appointment slot (15 min).
pub const MIN_BOOKING_LEAD_TIME: u64 = 900;

/// Gamification points awarded for a booking.
pub const BOOKING_POINTS: u32 = 20;

/// Points per gamification level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Rolling cooldown between data-reward payouts (24 h).
pub const REWARD_COOLDOWN: u64 = 86_400;

/// Fixed data-reward payout, in 7-decimal token units.
pub const REWARD_AMOUNT: i128 = 100_0000000;

/// Prescription validity window after review (30 days).
pub const PRESCRIPTION_VALIDITY: u64 = 2_592_000;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct HealthcareContract;

#[contractimpl]
impl HealthcareContract {
    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Bootstraps the contract with the admin, the three asset token
    /// contracts, and the designated relay identity.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_token: Address,
        stable_token: Address,
        reward_token: Address,
        relayer: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        storage::set_admin(&env, &admin);
        storage::set_token_config(
            &env,
            &TokenConfig {
                native: native_token,
                stable: stable_token,
                reward: reward_token,
            },
        );
        storage::set_relayer(&env, &relayer);
        storage::set_initialized(&env);

        rbac::grant_role(&env, &admin, &Role::Admin);

        events::publish_initialized(&env, admin, relayer);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::admin(&env)
    }

    /// Suspends every mutating entry point. Admin only.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::pause(&env, &caller)
    }

    /// Lifts the suspension. Admin only.
    pub fn resume(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::resume(&env, &caller)
    }

    pub fn is_paused(env: Env) -> bool {
        circuit_breaker::is_paused(&env)
    }

    // ── Role registry ───────────────────────────────────────────────────────

    /// Grants `role` to `identity`. Admin only.
    pub fn grant_role(
        env: Env,
        caller: Address,
        identity: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        rbac::grant_role(&env, &identity, &role);
        events::publish_role_granted(&env, identity, role);
        Ok(())
    }

    /// Revokes `role` from `identity`. Admin only.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        identity: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        rbac::revoke_role(&env, &identity, &role);
        events::publish_role_revoked(&env, identity, role);
        Ok(())
    }

    pub fn has_role(env: Env, identity: Address, role: Role) -> bool {
        rbac::has_role(&env, &identity, &role)
    }

    // ── Registration & participant records ──────────────────────────────────

    /// Self-registration for patients; grants the Patient role.
    pub fn register_patient(
        env: Env,
        caller: Address,
        encrypted_key: Bytes,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        registry::register_patient(&env, &caller, encrypted_key)
    }

    /// Replaces the caller's medical history content hash.
    pub fn update_medical_history(
        env: Env,
        patient: Address,
        history_hash: Bytes,
    ) -> Result<(), ContractError> {
        patient.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        registry::update_medical_history(&env, &patient, history_hash)
    }

    /// Flips the caller's data-sharing flag; enabling restarts the
    /// reward cooldown.
    pub fn set_data_sharing(
        env: Env,
        patient: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        patient.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        registry::set_data_sharing(&env, &patient, enabled)
    }

    /// Verifies a doctor with their license and consultation fee. Admin
    /// only; idempotent overwrite.
    pub fn verify_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
        license: String,
        fee: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        registry::verify_doctor(&env, &doctor, license, fee)
    }

    /// Verifies a lab technician. Admin only; idempotent overwrite.
    pub fn verify_lab_technician(
        env: Env,
        caller: Address,
        technician: Address,
        license: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        registry::verify_lab_technician(&env, &technician, license)
    }

    /// Registers a pharmacy. Admin only; idempotent overwrite.
    pub fn register_pharmacy(
        env: Env,
        caller: Address,
        pharmacy: Address,
        license: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        registry::register_pharmacy(&env, &pharmacy, license)
    }

    pub fn get_patient(env: Env, address: Address) -> Result<PatientRecord, ContractError> {
        storage::patient(&env, &address).ok_or(ContractError::PatientNotRegistered)
    }

    pub fn get_doctor(env: Env, address: Address) -> Result<DoctorRecord, ContractError> {
        storage::doctor(&env, &address).ok_or(ContractError::DoctorNotVerified)
    }

    pub fn get_lab_technician(env: Env, address: Address) -> Result<LabTechRecord, ContractError> {
        storage::lab_technician(&env, &address).ok_or(ContractError::LabTechNotVerified)
    }

    pub fn get_pharmacy(env: Env, address: Address) -> Result<PharmacyRecord, ContractError> {
        storage::pharmacy(&env, &address).ok_or(ContractError::PharmacyNotRegistered)
    }

    // ── Appointments ────────────────────────────────────────────────────────

    /// Books an appointment with a verified doctor, settling the fee in
    /// the chosen asset. Excess over the fee lands on the caller's
    /// refund ledger.
    pub fn book_appointment(
        env: Env,
        patient: Address,
        doctor: Address,
        scheduled_at: u64,
        asset: PaymentAsset,
        amount: i128,
        is_video: bool,
    ) -> Result<u64, ContractError> {
        patient.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        match appointments::book(&env, &patient, &doctor, scheduled_at, asset, amount, is_video) {
            Ok(id) => Ok(id),
            Err(error) => {
                errors::publish_error(&env, error, Some(patient));
                Err(error)
            }
        }
    }

    pub fn confirm_appointment(env: Env, doctor: Address, id: u64) -> Result<(), ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        appointments::confirm(&env, &doctor, id)
    }

    pub fn complete_appointment(env: Env, doctor: Address, id: u64) -> Result<(), ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        appointments::complete(&env, &doctor, id)
    }

    /// Cancels a pending or confirmed appointment; the fee is credited
    /// back to the patient's refund ledger.
    pub fn cancel_appointment(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        appointments::cancel(&env, &caller, id)
    }

    pub fn flag_emergency(env: Env, doctor: Address, id: u64) -> Result<(), ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        appointments::flag_emergency(&env, &doctor, id)
    }

    pub fn set_call_link(
        env: Env,
        doctor: Address,
        id: u64,
        link: String,
    ) -> Result<(), ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        appointments::set_call_link(&env, &doctor, id, link)
    }

    pub fn get_appointment(env: Env, id: u64) -> Result<Appointment, ContractError> {
        storage::appointment(&env, id)
    }

    /// Appointment ids for one patient, via the secondary index.
    pub fn get_patient_appointments(env: Env, patient: Address) -> Vec<u64> {
        storage::patient_appointments(&env, &patient)
    }

    pub fn get_appointment_count(env: Env) -> u64 {
        storage::appointment_count(&env)
    }

    // ── Lab tests ───────────────────────────────────────────────────────────

    /// Orders a lab test for a registered patient. Verified doctors only.
    pub fn order_lab_test(
        env: Env,
        doctor: Address,
        patient: Address,
        test_type: String,
    ) -> Result<u64, ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        lab_tests::order(&env, &doctor, &patient, test_type)
    }

    /// Collects the sample and assigns the technician to the order.
    pub fn collect_sample(
        env: Env,
        technician: Address,
        id: u64,
        sample_hash: Bytes,
    ) -> Result<(), ContractError> {
        technician.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        lab_tests::collect_sample(&env, &technician, id, sample_hash)
    }

    /// Uploads results; restricted to the assigned technician.
    pub fn upload_lab_results(
        env: Env,
        technician: Address,
        id: u64,
        results_hash: Bytes,
    ) -> Result<(), ContractError> {
        technician.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        lab_tests::upload_results(&env, &technician, id, results_hash)
    }

    /// Reviews uploaded results and generates the prescription. Returns
    /// the new prescription id.
    pub fn review_lab_results(
        env: Env,
        doctor: Address,
        id: u64,
        medication: String,
        details_hash: Bytes,
    ) -> Result<u64, ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        lab_tests::review_results(&env, &doctor, id, medication, details_hash)
    }

    pub fn get_lab_test(env: Env, id: u64) -> Result<LabTestOrder, ContractError> {
        storage::lab_test(&env, id)
    }

    pub fn get_lab_test_count(env: Env) -> u64 {
        storage::lab_test_count(&env)
    }

    // ── Prescriptions ───────────────────────────────────────────────────────

    /// Verifies a prescription against the presented plaintext code.
    pub fn verify_prescription(
        env: Env,
        pharmacy: Address,
        id: u64,
        code: Bytes,
    ) -> Result<(), ContractError> {
        pharmacy.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        prescriptions::verify(&env, &pharmacy, id, code)
    }

    /// Fulfills a verified prescription before its expiry.
    pub fn fulfill_prescription(env: Env, pharmacy: Address, id: u64) -> Result<(), ContractError> {
        pharmacy.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        prescriptions::fulfill(&env, &pharmacy, id)
    }

    pub fn get_prescription(env: Env, id: u64) -> Result<Prescription, ContractError> {
        storage::prescription(&env, id)
    }

    pub fn get_prescription_count(env: Env) -> u64 {
        storage::prescription_count(&env)
    }

    // ── Symptom analyses ────────────────────────────────────────────────────

    pub fn submit_symptom_analysis(
        env: Env,
        patient: Address,
        symptoms: String,
    ) -> Result<u64, ContractError> {
        patient.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        analyses::submit(&env, &patient, symptoms)
    }

    /// Records the off-chain inference result. Admin only; one-shot.
    pub fn record_analysis_result(
        env: Env,
        caller: Address,
        id: u64,
        analysis_hash: Bytes,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        analyses::record_result(&env, &caller, id, analysis_hash)
    }

    pub fn mark_analysis_reviewed(env: Env, doctor: Address, id: u64) -> Result<(), ContractError> {
        doctor.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        analyses::mark_reviewed(&env, &doctor, id)
    }

    pub fn get_symptom_analysis(env: Env, id: u64) -> Result<SymptomAnalysis, ContractError> {
        storage::analysis(&env, id)
    }

    pub fn get_analysis_count(env: Env) -> u64 {
        storage::analysis_count(&env)
    }

    // ── Rewards & refunds ───────────────────────────────────────────────────

    /// Explicit data-reward claim. Returns the paid amount.
    pub fn claim_data_reward(env: Env, patient: Address) -> Result<i128, ContractError> {
        patient.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        rewards::claim(&env, &patient)
    }

    /// Withdraws the caller's accumulated refund balance for one asset.
    pub fn withdraw_refund(
        env: Env,
        caller: Address,
        asset: PaymentAsset,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::non_reentrant(&env, || payments::withdraw_refund(&env, &caller, &asset))
    }

    pub fn get_refund_balance(env: Env, account: Address, asset: PaymentAsset) -> i128 {
        storage::refund_balance(&env, &account, &asset)
    }

    pub fn reward_treasury_balance(env: Env) -> Result<i128, ContractError> {
        payments::treasury_balance(&env, &PaymentAsset::Reward)
    }

    // ── Meta-transaction relay ──────────────────────────────────────────────

    /// Validates and dispatches an operation submitted by the designated
    /// relay on behalf of a patient.
    pub fn execute_relayed(
        env: Env,
        caller: Address,
        op: RelayedOperation,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;

        let sender = op.sender.clone();
        match relay::execute(&env, &caller, op) {
            Ok(()) => Ok(()),
            Err(error) => {
                errors::publish_error(&env, error, Some(sender));
                Err(error)
            }
        }
    }

    /// Rotates the designated relay identity. Admin only.
    pub fn set_relayer(env: Env, caller: Address, relayer: Address) -> Result<(), ContractError> {
        caller.require_auth();
        storage::require_initialized(&env)?;
        circuit_breaker::require_not_paused(&env)?;
        rbac::require_admin(&env, &caller)?;

        storage::set_relayer(&env, &relayer);
        Ok(())
    }

    pub fn get_relayer(env: Env) -> Result<Address, ContractError> {
        storage::relayer(&env)
    }

    /// Next nonce the relay must embed for `sender`.
    pub fn relay_nonce(env: Env, sender: Address) -> u64 {
        common::nonce::expected_nonce(&env, &sender)
    }
}




#[cfg(test)]
mod test_pause;

#[cfg(test)]
mod test_relay;

#[cfg(test)]
mod test_rewards;
