//! Data-sharing reward engine.
//!
//! A patient accrues a fixed reward at most once per rolling cooldown
//! window measured from their own previous payout, and only while their
//! data-sharing flag is on. The explicit claim path surfaces every failed
//! precondition; the implicit trigger (fired by data-producing actions)
//! is best-effort and publishes a `RWD_SKIP` event instead of failing the
//! enclosing operation.

use soroban_sdk::{symbol_short, token, Address, Env};

use crate::errors::ContractError;
use crate::types::{PatientRecord, PaymentAsset};
use crate::{events, reentrancy, registry, storage};

enum Precondition {
    Met,
    SharingDisabled,
    CooldownActive,
    TreasuryExhausted,
}

fn check_preconditions(env: &Env, record: &PatientRecord) -> Result<Precondition, ContractError> {
    if !record.data_sharing {
        return Ok(Precondition::SharingDisabled);
    }

    let now = env.ledger().timestamp();
    if now < record.last_reward_at.saturating_add(crate::REWARD_COOLDOWN) {
        return Ok(Precondition::CooldownActive);
    }

    let reward_token = storage::token_address(env, &PaymentAsset::Reward)?;
    let balance = token::Client::new(env, &reward_token).balance(&env.current_contract_address());
    if balance < crate::REWARD_AMOUNT {
        return Ok(Precondition::TreasuryExhausted);
    }

    Ok(Precondition::Met)
}

fn pay(env: &Env, record: &mut PatientRecord) -> Result<(), ContractError> {
    let reward_token = storage::token_address(env, &PaymentAsset::Reward)?;
    let client = token::Client::new(env, &reward_token);
    if client
        .try_transfer(
            &env.current_contract_address(),
            &record.address,
            &crate::REWARD_AMOUNT,
        )
        .is_err()
    {
        return Err(ContractError::TransferFailed);
    }

    record.last_reward_at = env.ledger().timestamp();
    storage::set_patient(env, record);

    events::publish_reward_paid(env, record.address.clone(), crate::REWARD_AMOUNT);
    Ok(())
}

/// Explicit claim path. Fails loudly on every unmet precondition and runs
/// under the re-entrancy guard because it moves funds.
pub fn claim(env: &Env, patient: &Address) -> Result<i128, ContractError> {
    reentrancy::non_reentrant(env, || {
        let mut record = registry::require_registered_patient(env, patient)?;

        match check_preconditions(env, &record)? {
            Precondition::Met => {}
            Precondition::SharingDisabled => return Err(ContractError::DataSharingDisabled),
            Precondition::CooldownActive => return Err(ContractError::RewardCooldownActive),
            Precondition::TreasuryExhausted => return Err(ContractError::InsufficientTreasury),
        }

        pay(env, &mut record)?;
        Ok(crate::REWARD_AMOUNT)
    })
}

/// Implicit trigger fired by data-producing actions.
///
/// Never fails the enclosing operation: an unmet precondition (or a
/// missing patient record) publishes a `RWD_SKIP` event and returns. A
/// skipped payout is therefore observable without being fatal.
pub fn try_trigger(env: &Env, patient: &Address) {
    let Some(mut record) = storage::patient(env, patient) else {
        return;
    };

    let reason = match check_preconditions(env, &record) {
        Ok(Precondition::Met) => match pay(env, &mut record) {
            Ok(()) => return,
            Err(_) => symbol_short!("treasury"),
        },
        Ok(Precondition::SharingDisabled) => symbol_short!("sharing"),
        Ok(Precondition::CooldownActive) => symbol_short!("cooldown"),
        Ok(Precondition::TreasuryExhausted) => symbol_short!("treasury"),
        Err(_) => symbol_short!("treasury"),
    };

    events::publish_reward_skipped(env, patient.clone(), reason);
}
