use soroban_sdk::{contracttype, Address, Bytes, BytesN, String};

/// Asset selector for fee settlement and refunds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PaymentAsset {
    /// The chain's native asset (as a Stellar Asset Contract).
    Native,
    /// The configured stable asset.
    Stable,
    /// The reward asset also paid out by the reward engine.
    Reward,
}

/// Appointment lifecycle.
///
/// Pending → Confirmed → Completed | Cancelled; Pending may also move to
/// Cancelled directly or be escalated to Emergency. No backward edges.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Emergency,
}

/// Lab test lifecycle: strictly linear, no skip edges.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LabTestStatus {
    Requested,
    Collected,
    ResultsUploaded,
    Reviewed,
}

/// Prescription lifecycle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrescriptionStatus {
    Generated,
    Verified,
    Fulfilled,
}

/// Patient profile. The encrypted key blob and content hashes are opaque
/// to the contract: stored and compared, never parsed.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PatientRecord {
    pub address: Address,
    pub encrypted_key: Bytes,
    pub medical_history_hash: Bytes,
    pub points: u32,
    pub level: u32,
    pub data_sharing: bool,
    pub last_reward_at: u64,
    pub registered_at: u64,
}

/// Doctor profile. Fee and license change only through re-verification.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DoctorRecord {
    pub address: Address,
    pub license: String,
    pub fee: i128,
    pub verified: bool,
    pub verified_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LabTechRecord {
    pub address: Address,
    pub license: String,
    pub verified: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PharmacyRecord {
    pub address: Address,
    pub license: String,
    pub registered: bool,
}

/// A booked appointment. Mutated only by status transitions; never deleted.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Appointment {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub scheduled_at: u64,
    pub status: AppointmentStatus,
    pub fee: i128,
    pub asset: PaymentAsset,
    pub call_link: String,
    pub is_video: bool,
    pub booked_at: u64,
}

/// A lab test order. The technician field is set exactly once, at sample
/// collection.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LabTestOrder {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub technician: Option<Address>,
    pub status: LabTestStatus,
    pub test_type: String,
    pub sample_hash: Bytes,
    pub results_hash: Bytes,
    pub ordered_at: u64,
    pub completed_at: u64,
}

/// A prescription, created only as a side effect of lab-result review.
/// Only the sha256 commitment of the verification code is stored.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Prescription {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub code_hash: BytesN<32>,
    pub medication: String,
    pub details_hash: Bytes,
    pub status: PrescriptionStatus,
    pub pharmacy: Option<Address>,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// A submitted symptom analysis awaiting the off-chain inference result
/// and a clinician review.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SymptomAnalysis {
    pub id: u64,
    pub patient: Address,
    pub symptoms: String,
    pub analysis_hash: Bytes,
    pub reviewed: bool,
    pub submitted_at: u64,
}
