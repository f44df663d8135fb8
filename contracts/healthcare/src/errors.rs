use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Error categories mirroring the workflow's failure taxonomy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed input or a violated timing window
    Validation = 1,
    /// Wrong role or wrong owning identity
    Authorization = 2,
    /// Resource lookup failures
    NotFound = 3,
    /// Operation invalid for the record's current status
    State = 4,
    /// Insufficient balance, failed transfer, or exhausted treasury
    Funds = 5,
    /// A time window has lapsed
    Expired = 6,
    /// Contract-level issues like pausing or re-entrancy
    System = 7,
}

/// Error severity levels indicating the impact and urgency of errors.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

/// Structured context attached to the `ERROR` event.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub user: Option<Address>,
    pub timestamp: u64,
    pub retryable: bool,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    Paused = 4,
    ReentrancyDetected = 5,
    InvalidInput = 6,
    PatientNotRegistered = 10,
    AlreadyRegistered = 11,
    DoctorNotVerified = 12,
    LabTechNotVerified = 13,
    PharmacyNotRegistered = 14,
    AppointmentNotFound = 20,
    LabTestNotFound = 21,
    PrescriptionNotFound = 22,
    AnalysisNotFound = 23,
    InvalidStatus = 30,
    AppointmentTooSoon = 31,
    InvalidVerificationCode = 32,
    AlreadyRecorded = 33,
    DataSharingDisabled = 34,
    RewardCooldownActive = 35,
    InsufficientFunds = 40,
    TransferFailed = 41,
    InsufficientTreasury = 42,
    NothingToWithdraw = 43,
    PrescriptionExpired = 50,
    RelayExpired = 60,
    NonceAlreadyUsed = 61,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput
            | ContractError::AppointmentTooSoon
            | ContractError::InvalidVerificationCode
            | ContractError::DataSharingDisabled
            | ContractError::RewardCooldownActive
            | ContractError::RelayExpired
            | ContractError::NonceAlreadyUsed => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::PatientNotRegistered
            | ContractError::DoctorNotVerified
            | ContractError::LabTechNotVerified
            | ContractError::PharmacyNotRegistered => ErrorCategory::Authorization,
            ContractError::AppointmentNotFound
            | ContractError::LabTestNotFound
            | ContractError::PrescriptionNotFound
            | ContractError::AnalysisNotFound => ErrorCategory::NotFound,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::AlreadyRegistered
            | ContractError::AlreadyRecorded
            | ContractError::InvalidStatus => ErrorCategory::State,
            ContractError::InsufficientFunds
            | ContractError::TransferFailed
            | ContractError::InsufficientTreasury
            | ContractError::NothingToWithdraw => ErrorCategory::Funds,
            ContractError::PrescriptionExpired => ErrorCategory::Expired,
            ContractError::Paused | ContractError::ReentrancyDetected => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidInput
            | ContractError::AppointmentTooSoon
            | ContractError::AppointmentNotFound
            | ContractError::LabTestNotFound
            | ContractError::PrescriptionNotFound
            | ContractError::AnalysisNotFound
            | ContractError::DataSharingDisabled
            | ContractError::RewardCooldownActive
            | ContractError::NothingToWithdraw
            | ContractError::AlreadyRecorded => ErrorSeverity::Low,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Unauthorized
            | ContractError::AlreadyRegistered
            | ContractError::PatientNotRegistered
            | ContractError::DoctorNotVerified
            | ContractError::LabTechNotVerified
            | ContractError::PharmacyNotRegistered
            | ContractError::InvalidStatus
            | ContractError::InvalidVerificationCode
            | ContractError::PrescriptionExpired
            | ContractError::RelayExpired
            | ContractError::NonceAlreadyUsed => ErrorSeverity::Medium,
            ContractError::InsufficientFunds
            | ContractError::TransferFailed
            | ContractError::InsufficientTreasury => ErrorSeverity::High,
            ContractError::Paused | ContractError::ReentrancyDetected => ErrorSeverity::Critical,
        }
    }

    /// Returns whether this error is retryable.
    /// Retryable errors indicate transient failures that may succeed on retry.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            ContractError::Paused
                | ContractError::TransferFailed
                | ContractError::InsufficientTreasury
        )
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::ReentrancyDetected => "Re-entrant call into a funds-moving entry point",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::PatientNotRegistered => "Caller has no patient record",
            ContractError::AlreadyRegistered => "Patient record already exists for this identity",
            ContractError::DoctorNotVerified => "Doctor is not verified",
            ContractError::LabTechNotVerified => "Lab technician is not verified",
            ContractError::PharmacyNotRegistered => "Pharmacy is not registered",
            ContractError::AppointmentNotFound => "Appointment not found",
            ContractError::LabTestNotFound => "Lab test order not found",
            ContractError::PrescriptionNotFound => "Prescription not found",
            ContractError::AnalysisNotFound => "Symptom analysis not found",
            ContractError::InvalidStatus => "Operation invalid for the record's current status",
            ContractError::AppointmentTooSoon => "Appointment time is below the minimum lead time",
            ContractError::InvalidVerificationCode => "Verification code does not match commitment",
            ContractError::AlreadyRecorded => "Value has already been recorded",
            ContractError::DataSharingDisabled => "Patient has not enabled data sharing",
            ContractError::RewardCooldownActive => "Reward cooldown window has not elapsed",
            ContractError::InsufficientFunds => "Offered amount does not cover the fee",
            ContractError::TransferFailed => "Token transfer failed",
            ContractError::InsufficientTreasury => "Reward treasury cannot cover the payout",
            ContractError::NothingToWithdraw => "No refund balance to withdraw",
            ContractError::PrescriptionExpired => "Prescription validity window has lapsed",
            ContractError::RelayExpired => "Relayed operation has expired",
            ContractError::NonceAlreadyUsed => "Relay nonce has already been used",
        }
    }
}

/// Creates the context attached to a published `ERROR` event.
pub fn create_error_context(
    env: &Env,
    error: ContractError,
    user: Option<Address>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        user,
        timestamp: env.ledger().timestamp(),
        retryable: error.retryable(),
    }
}

/// Publishes a classified error event for monitoring and indexing.
pub fn publish_error(env: &Env, error: ContractError, user: Option<Address>) {
    let context = create_error_context(env, error, user);
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    env.events().publish(topics, (error as u32, context));
}
