//! Storage keys and typed accessors.
//!
//! All mappings and counters live here; workflow modules never touch raw
//! storage keys. Identifier counters are dense and monotonic per entity
//! type, starting at 1 — 0 is never a valid identifier and denotes "unset".

use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val, Vec};

use crate::errors::ContractError;
use crate::types::{
    Appointment, DoctorRecord, LabTechRecord, LabTestOrder, PatientRecord, PaymentAsset,
    PharmacyRecord, Prescription, SymptomAnalysis,
};

// ── Instance keys ────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKENS: Symbol = symbol_short!("TOKENS");
const RELAYER: Symbol = symbol_short!("RELAYER");

const APPT_CTR: Symbol = symbol_short!("APPT_CTR");
const LAB_CTR: Symbol = symbol_short!("LAB_CTR");
const RX_CTR: Symbol = symbol_short!("RX_CTR");
const AI_CTR: Symbol = symbol_short!("AI_CTR");

// ── Persistent key prefixes ──────────────────────────────────────────────────

const PATIENT: Symbol = symbol_short!("PATIENT");
const DOCTOR: Symbol = symbol_short!("DOCTOR");
const LABTECH: Symbol = symbol_short!("LABTECH");
const PHARMACY: Symbol = symbol_short!("PHARMACY");
const APPT: Symbol = symbol_short!("APPT");
const LAB: Symbol = symbol_short!("LAB");
const RX: Symbol = symbol_short!("RX");
const AI: Symbol = symbol_short!("AI");
const PAT_APPT: Symbol = symbol_short!("PAT_APPT");
const REFUND: Symbol = symbol_short!("REFUND");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn extend_persistent<K: IntoVal<Env, Val>>(env: &Env, key: &K) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Token contract addresses backing the three payment assets.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfig {
    pub native: Address,
    pub stable: Address,
    pub reward: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if is_initialized(env) {
        Ok(())
    } else {
        Err(ContractError::NotInitialized)
    }
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_token_config(env: &Env, config: &TokenConfig) {
    env.storage().instance().set(&TOKENS, config);
}

pub fn token_address(env: &Env, asset: &PaymentAsset) -> Result<Address, ContractError> {
    let config: TokenConfig = env
        .storage()
        .instance()
        .get(&TOKENS)
        .ok_or(ContractError::NotInitialized)?;
    Ok(match asset {
        PaymentAsset::Native => config.native,
        PaymentAsset::Stable => config.stable,
        PaymentAsset::Reward => config.reward,
    })
}

pub fn set_relayer(env: &Env, relayer: &Address) {
    env.storage().instance().set(&RELAYER, relayer);
}

pub fn relayer(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&RELAYER)
        .ok_or(ContractError::NotInitialized)
}

// ── Identifier counters ──────────────────────────────────────────────────────

fn next_id(env: &Env, counter: &Symbol) -> u64 {
    let current: u64 = env.storage().instance().get(counter).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(counter, &next);
    next
}

fn current_count(env: &Env, counter: &Symbol) -> u64 {
    env.storage().instance().get(counter).unwrap_or(0)
}

pub fn next_appointment_id(env: &Env) -> u64 {
    next_id(env, &APPT_CTR)
}

pub fn next_lab_test_id(env: &Env) -> u64 {
    next_id(env, &LAB_CTR)
}

pub fn next_prescription_id(env: &Env) -> u64 {
    next_id(env, &RX_CTR)
}

pub fn next_analysis_id(env: &Env) -> u64 {
    next_id(env, &AI_CTR)
}

pub fn appointment_count(env: &Env) -> u64 {
    current_count(env, &APPT_CTR)
}

pub fn lab_test_count(env: &Env) -> u64 {
    current_count(env, &LAB_CTR)
}

pub fn prescription_count(env: &Env) -> u64 {
    current_count(env, &RX_CTR)
}

pub fn analysis_count(env: &Env) -> u64 {
    current_count(env, &AI_CTR)
}

// ── Participant records ──────────────────────────────────────────────────────

pub fn patient(env: &Env, address: &Address) -> Option<PatientRecord> {
    env.storage().persistent().get(&(PATIENT, address.clone()))
}

pub fn set_patient(env: &Env, record: &PatientRecord) {
    let key = (PATIENT, record.address.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn doctor(env: &Env, address: &Address) -> Option<DoctorRecord> {
    env.storage().persistent().get(&(DOCTOR, address.clone()))
}

pub fn set_doctor(env: &Env, record: &DoctorRecord) {
    let key = (DOCTOR, record.address.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn lab_technician(env: &Env, address: &Address) -> Option<LabTechRecord> {
    env.storage().persistent().get(&(LABTECH, address.clone()))
}

pub fn set_lab_technician(env: &Env, record: &LabTechRecord) {
    let key = (LABTECH, record.address.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn pharmacy(env: &Env, address: &Address) -> Option<PharmacyRecord> {
    env.storage().persistent().get(&(PHARMACY, address.clone()))
}

pub fn set_pharmacy(env: &Env, record: &PharmacyRecord) {
    let key = (PHARMACY, record.address.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

// ── Workflow records ─────────────────────────────────────────────────────────

pub fn appointment(env: &Env, id: u64) -> Result<Appointment, ContractError> {
    env.storage()
        .persistent()
        .get(&(APPT, id))
        .ok_or(ContractError::AppointmentNotFound)
}

pub fn set_appointment(env: &Env, record: &Appointment) {
    let key = (APPT, record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn lab_test(env: &Env, id: u64) -> Result<LabTestOrder, ContractError> {
    env.storage()
        .persistent()
        .get(&(LAB, id))
        .ok_or(ContractError::LabTestNotFound)
}

pub fn set_lab_test(env: &Env, record: &LabTestOrder) {
    let key = (LAB, record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn prescription(env: &Env, id: u64) -> Result<Prescription, ContractError> {
    env.storage()
        .persistent()
        .get(&(RX, id))
        .ok_or(ContractError::PrescriptionNotFound)
}

pub fn set_prescription(env: &Env, record: &Prescription) {
    let key = (RX, record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

pub fn analysis(env: &Env, id: u64) -> Result<SymptomAnalysis, ContractError> {
    env.storage()
        .persistent()
        .get(&(AI, id))
        .ok_or(ContractError::AnalysisNotFound)
}

pub fn set_analysis(env: &Env, record: &SymptomAnalysis) {
    let key = (AI, record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

// ── Secondary index: patient → appointment ids ──────────────────────────────

pub fn patient_appointments(env: &Env, patient: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&(PAT_APPT, patient.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn push_patient_appointment(env: &Env, patient: &Address, id: u64) {
    let key = (PAT_APPT, patient.clone());
    let mut ids = patient_appointments(env, patient);
    ids.push_back(id);
    env.storage().persistent().set(&key, &ids);
    extend_persistent(env, &key);
}

// ── Refund ledger ────────────────────────────────────────────────────────────

fn refund_key(account: &Address, asset: &PaymentAsset) -> (Symbol, Address, PaymentAsset) {
    (REFUND, account.clone(), asset.clone())
}

pub fn refund_balance(env: &Env, account: &Address, asset: &PaymentAsset) -> i128 {
    env.storage()
        .persistent()
        .get(&refund_key(account, asset))
        .unwrap_or(0)
}

pub fn credit_refund(env: &Env, account: &Address, asset: &PaymentAsset, amount: i128) {
    let key = refund_key(account, asset);
    let balance = refund_balance(env, account, asset).saturating_add(amount);
    env.storage().persistent().set(&key, &balance);
    extend_persistent(env, &key);
}

/// Zeroes and returns the refund balance. The caller transfers it out.
pub fn take_refund(env: &Env, account: &Address, asset: &PaymentAsset) -> i128 {
    let key = refund_key(account, asset);
    let balance = refund_balance(env, account, asset);
    env.storage().persistent().set(&key, &0i128);
    balance
}
