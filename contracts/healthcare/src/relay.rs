//! Meta-transaction relay.
//!
//! A single designated relay identity submits operations on behalf of
//! patients who do not transact directly. Every operation carries the
//! sender's ed25519 public key, a per-sender nonce, an expiry, and a
//! signature over the canonical message; the host verifies the signature
//! before anything is dispatched, so authorization never rests on
//! trusting the relay alone. A failed inner dispatch aborts the whole
//! relay with the inner error.

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::errors::ContractError;
use crate::rbac::{self, Role};
use crate::{analyses, events, registry, rewards, storage};

/// The call payload embedded in a relayed operation. Restricted to the
/// patient-facing operations that make sense to sponsor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RelayedCall {
    SetDataSharing(bool),
    SubmitSymptoms(String),
    UpdateMedicalHistory(Bytes),
    ClaimReward,
}

/// A signed operation submitted by the relay on behalf of `sender`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayedOperation {
    pub sender: Address,
    pub sender_pubkey: BytesN<32>,
    pub nonce: u64,
    pub expires_at: u64,
    pub call: RelayedCall,
    pub signature: BytesN<64>,
}

/// Validates and dispatches a relayed operation.
pub fn execute(env: &Env, caller: &Address, op: RelayedOperation) -> Result<(), ContractError> {
    let relayer = storage::relayer(env)?;
    if *caller != relayer {
        return Err(ContractError::Unauthorized);
    }

    if env.ledger().timestamp() >= op.expires_at {
        return Err(ContractError::RelayExpired);
    }

    // The declared sender must be the relay itself or a known patient.
    if op.sender != *caller && !rbac::has_role(env, &op.sender, &Role::Patient) {
        return Err(ContractError::Unauthorized);
    }

    let call_xdr = op.call.clone().to_xdr(env);
    let message =
        common::meta_tx::build_relayed_message(env, &op.sender_pubkey, &call_xdr, op.nonce, op.expires_at);
    common::meta_tx::verify_relay_signature(env, &op.sender_pubkey, &message, &op.signature);

    common::nonce::consume_nonce(env, &op.sender, op.nonce)
        .map_err(|_| ContractError::NonceAlreadyUsed)?;

    match op.call {
        RelayedCall::SetDataSharing(enabled) => {
            registry::set_data_sharing(env, &op.sender, enabled)?;
        }
        RelayedCall::SubmitSymptoms(symptoms) => {
            analyses::submit(env, &op.sender, symptoms)?;
        }
        RelayedCall::UpdateMedicalHistory(history_hash) => {
            registry::update_medical_history(env, &op.sender, history_hash)?;
        }
        RelayedCall::ClaimReward => {
            rewards::claim(env, &op.sender)?;
        }
    }

    events::publish_relay_executed(env, op.sender, caller.clone(), op.nonce);
    Ok(())
}
