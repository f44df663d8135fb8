//! Typed events published on every successful mutation.
//!
//! The event stream is the sole mechanism by which off-chain systems
//! observe state changes; topics carry a short symbol plus the primary
//! participant(s) so indexers can filter without decoding payloads.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::rbac::Role;
use crate::types::{AppointmentStatus, PaymentAsset};

// ── Lifecycle ────────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub relayer: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, relayer: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        relayer,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub admin: Address,
    pub timestamp: u64,
}

pub fn publish_paused(env: &Env, admin: Address) {
    let topics = (symbol_short!("PAUSED"),);
    let data = PauseEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_resumed(env: &Env, admin: Address) {
    let topics = (symbol_short!("RESUMED"),);
    let data = PauseEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Roles & registration ─────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleEvent {
    pub identity: Address,
    pub role: Role,
    pub timestamp: u64,
}

pub fn publish_role_granted(env: &Env, identity: Address, role: Role) {
    let topics = (symbol_short!("ROLE_GRT"), identity.clone());
    let data = RoleEvent {
        identity,
        role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_revoked(env: &Env, identity: Address, role: Role) {
    let topics = (symbol_short!("ROLE_REV"), identity.clone());
    let data = RoleEvent {
        identity,
        role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient: Address,
    pub timestamp: u64,
}

pub fn publish_patient_registered(env: &Env, patient: Address) {
    let topics = (symbol_short!("PAT_REG"), patient.clone());
    let data = PatientRegisteredEvent {
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorVerifiedEvent {
    pub doctor: Address,
    pub fee: i128,
    pub timestamp: u64,
}

pub fn publish_doctor_verified(env: &Env, doctor: Address, fee: i128) {
    let topics = (symbol_short!("DOC_VER"), doctor.clone());
    let data = DoctorVerifiedEvent {
        doctor,
        fee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantEvent {
    pub identity: Address,
    pub timestamp: u64,
}

pub fn publish_lab_technician_verified(env: &Env, technician: Address) {
    let topics = (symbol_short!("TECH_VER"), technician.clone());
    let data = ParticipantEvent {
        identity: technician,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_pharmacy_registered(env: &Env, pharmacy: Address) {
    let topics = (symbol_short!("PHARM_REG"), pharmacy.clone());
    let data = ParticipantEvent {
        identity: pharmacy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataSharingEvent {
    pub patient: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

pub fn publish_data_sharing_set(env: &Env, patient: Address, enabled: bool) {
    let topics = (symbol_short!("SHARE_SET"), patient.clone());
    let data = DataSharingEvent {
        patient,
        enabled,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Appointments ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentBookedEvent {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub scheduled_at: u64,
    pub fee: i128,
    pub asset: PaymentAsset,
    pub timestamp: u64,
}

pub fn publish_appointment_booked(
    env: &Env,
    id: u64,
    patient: Address,
    doctor: Address,
    scheduled_at: u64,
    fee: i128,
    asset: PaymentAsset,
) {
    let topics = (symbol_short!("APPT_BOOK"), patient.clone(), doctor.clone());
    let data = AppointmentBookedEvent {
        id,
        patient,
        doctor,
        scheduled_at,
        fee,
        asset,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentTransitionEvent {
    pub id: u64,
    pub status: AppointmentStatus,
    pub by: Address,
    pub timestamp: u64,
}

fn publish_appointment_transition(
    env: &Env,
    topic: Symbol,
    id: u64,
    status: AppointmentStatus,
    by: Address,
) {
    let topics = (topic, id);
    let data = AppointmentTransitionEvent {
        id,
        status,
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_appointment_confirmed(env: &Env, id: u64, doctor: Address) {
    publish_appointment_transition(
        env,
        symbol_short!("APPT_CONF"),
        id,
        AppointmentStatus::Confirmed,
        doctor,
    );
}

pub fn publish_appointment_completed(env: &Env, id: u64, doctor: Address) {
    publish_appointment_transition(
        env,
        symbol_short!("APPT_DONE"),
        id,
        AppointmentStatus::Completed,
        doctor,
    );
}

pub fn publish_appointment_cancelled(env: &Env, id: u64, by: Address) {
    publish_appointment_transition(
        env,
        symbol_short!("APPT_CANC"),
        id,
        AppointmentStatus::Cancelled,
        by,
    );
}

pub fn publish_appointment_emergency(env: &Env, id: u64, doctor: Address) {
    publish_appointment_transition(
        env,
        symbol_short!("APPT_EMRG"),
        id,
        AppointmentStatus::Emergency,
        doctor,
    );
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallLinkSetEvent {
    pub id: u64,
    pub doctor: Address,
    pub timestamp: u64,
}

pub fn publish_call_link_set(env: &Env, id: u64, doctor: Address) {
    let topics = (symbol_short!("APPT_LINK"), id);
    let data = CallLinkSetEvent {
        id,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Lab tests ────────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabTestOrderedEvent {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub test_type: String,
    pub timestamp: u64,
}

pub fn publish_lab_test_ordered(
    env: &Env,
    id: u64,
    patient: Address,
    doctor: Address,
    test_type: String,
) {
    let topics = (symbol_short!("LAB_ORD"), patient.clone(), doctor.clone());
    let data = LabTestOrderedEvent {
        id,
        patient,
        doctor,
        test_type,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabTestProgressEvent {
    pub id: u64,
    pub technician: Address,
    pub timestamp: u64,
}

pub fn publish_sample_collected(env: &Env, id: u64, technician: Address) {
    let topics = (symbol_short!("LAB_COLL"), id);
    let data = LabTestProgressEvent {
        id,
        technician,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_results_uploaded(env: &Env, id: u64, technician: Address) {
    let topics = (symbol_short!("LAB_RES"), id);
    let data = LabTestProgressEvent {
        id,
        technician,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabTestReviewedEvent {
    pub id: u64,
    pub doctor: Address,
    pub prescription_id: u64,
    pub timestamp: u64,
}

pub fn publish_lab_test_reviewed(env: &Env, id: u64, doctor: Address, prescription_id: u64) {
    let topics = (symbol_short!("LAB_REV"), id);
    let data = LabTestReviewedEvent {
        id,
        doctor,
        prescription_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Prescriptions ────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionGeneratedEvent {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub expires_at: u64,
    pub timestamp: u64,
}

pub fn publish_prescription_generated(
    env: &Env,
    id: u64,
    patient: Address,
    doctor: Address,
    expires_at: u64,
) {
    let topics = (symbol_short!("RX_GEN"), patient.clone());
    let data = PrescriptionGeneratedEvent {
        id,
        patient,
        doctor,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionProgressEvent {
    pub id: u64,
    pub pharmacy: Address,
    pub timestamp: u64,
}

pub fn publish_prescription_verified(env: &Env, id: u64, pharmacy: Address) {
    let topics = (symbol_short!("RX_VER"), id);
    let data = PrescriptionProgressEvent {
        id,
        pharmacy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_prescription_fulfilled(env: &Env, id: u64, pharmacy: Address) {
    let topics = (symbol_short!("RX_FILL"), id);
    let data = PrescriptionProgressEvent {
        id,
        pharmacy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Symptom analyses ─────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalysisSubmittedEvent {
    pub id: u64,
    pub patient: Address,
    pub timestamp: u64,
}

pub fn publish_analysis_submitted(env: &Env, id: u64, patient: Address) {
    let topics = (symbol_short!("AI_SUB"), patient.clone());
    let data = AnalysisSubmittedEvent {
        id,
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalysisProgressEvent {
    pub id: u64,
    pub by: Address,
    pub timestamp: u64,
}

pub fn publish_analysis_result_recorded(env: &Env, id: u64, by: Address) {
    let topics = (symbol_short!("AI_RES"), id);
    let data = AnalysisProgressEvent {
        id,
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_analysis_reviewed(env: &Env, id: u64, doctor: Address) {
    let topics = (symbol_short!("AI_REV"), id);
    let data = AnalysisProgressEvent {
        id,
        by: doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Rewards & refunds ────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub patient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_reward_paid(env: &Env, patient: Address, amount: i128) {
    let topics = (symbol_short!("RWD_PAY"), patient.clone());
    let data = RewardPaidEvent {
        patient,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Published when the implicit reward trigger skips a payout. The reason
/// symbol is one of `sharing`, `cooldown`, or `treasury`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSkippedEvent {
    pub patient: Address,
    pub reason: Symbol,
    pub timestamp: u64,
}

pub fn publish_reward_skipped(env: &Env, patient: Address, reason: Symbol) {
    let topics = (symbol_short!("RWD_SKIP"), patient.clone());
    let data = RewardSkippedEvent {
        patient,
        reason,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundEvent {
    pub account: Address,
    pub asset: PaymentAsset,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_refund_credited(env: &Env, account: Address, asset: PaymentAsset, amount: i128) {
    let topics = (symbol_short!("RFND_CR"), account.clone());
    let data = RefundEvent {
        account,
        asset,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_refund_withdrawn(env: &Env, account: Address, asset: PaymentAsset, amount: i128) {
    let topics = (symbol_short!("RFND_WD"), account.clone());
    let data = RefundEvent {
        account,
        asset,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

// ── Relay ────────────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayExecutedEvent {
    pub sender: Address,
    pub relayer: Address,
    pub nonce: u64,
    pub timestamp: u64,
}

pub fn publish_relay_executed(env: &Env, sender: Address, relayer: Address, nonce: u64) {
    let topics = (symbol_short!("RELAY_EX"), sender.clone());
    let data = RelayExecutedEvent {
        sender,
        relayer,
        nonce,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
