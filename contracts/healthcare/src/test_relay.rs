#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::test::{mint, register_patient, setup, T0};
use super::*;
use ed25519_dalek::{Signer, SigningKey};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, xdr::ToXdr, Bytes, BytesN, Env};

fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

fn to_std_bytes(bytes: &Bytes) -> std::vec::Vec<u8> {
    let mut out = std::vec::Vec::with_capacity(bytes.len() as usize);
    for b in bytes.iter() {
        out.push(b);
    }
    out
}

/// Builds a fully signed relayed operation the way an off-chain wallet
/// would.
fn signed_op(
    env: &Env,
    key: &SigningKey,
    sender: &Address,
    call: RelayedCall,
    nonce: u64,
    expires_at: u64,
) -> RelayedOperation {
    let pubkey = BytesN::from_array(env, &key.verifying_key().to_bytes());
    let call_xdr = call.clone().to_xdr(env);
    let message =
        common::meta_tx::build_relayed_message(env, &pubkey, &call_xdr, nonce, expires_at);
    let signature = key.sign(&to_std_bytes(&message)).to_bytes();

    RelayedOperation {
        sender: sender.clone(),
        sender_pubkey: pubkey,
        nonce,
        expires_at,
        call,
        signature: BytesN::from_array(env, &signature),
    }
}

#[test]
fn relayed_set_data_sharing_executes() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);

    let nonce = s.client.relay_nonce(&patient);
    assert_eq!(nonce, 0);

    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        nonce,
        T0 + 600,
    );
    s.client.execute_relayed(&s.relayer, &op);

    assert!(s.client.get_patient(&patient).data_sharing);
    assert_eq!(s.client.relay_nonce(&patient), 1);
}

#[test]
fn only_the_designated_relayer_submits() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        0,
        T0 + 600,
    );

    let impostor = Address::generate(&env);
    let res = s.client.try_execute_relayed(&impostor, &op);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Unauthorized)));
}

#[test]
fn expired_operations_are_rejected() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        0,
        T0,
    );

    let res = s.client.try_execute_relayed(&s.relayer, &op);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::RelayExpired)));
}

#[test]
fn replayed_operations_are_rejected() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        0,
        T0 + 600,
    );

    s.client.execute_relayed(&s.relayer, &op);

    // The same signed bytes cannot be submitted a second time.
    let res = s.client.try_execute_relayed(&s.relayer, &op);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::NonceAlreadyUsed)
    ));
}

#[test]
#[should_panic]
fn tampered_payloads_fail_signature_verification() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    let mut op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        0,
        T0 + 600,
    );

    // Flip the call after signing.
    op.call = RelayedCall::SetDataSharing(false);
    s.client.execute_relayed(&s.relayer, &op);
}

#[test]
fn unknown_senders_are_rejected() {
    let env = Env::default();
    let s = setup(&env);

    let stranger = Address::generate(&env);
    let key = signing_key(42);
    let op = signed_op(
        &env,
        &key,
        &stranger,
        RelayedCall::SetDataSharing(true),
        0,
        T0 + 600,
    );

    let res = s.client.try_execute_relayed(&s.relayer, &op);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Unauthorized)));
}

#[test]
fn inner_errors_abort_the_relay() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);

    // Claiming without data sharing fails, and the failure surfaces.
    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::ClaimReward,
        0,
        T0 + 600,
    );
    let res = s.client.try_execute_relayed(&s.relayer, &op);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::DataSharingDisabled)
    ));

    // An aborted relay does not consume the nonce permanently: the whole
    // transaction rolls back, so the same nonce signs the next attempt.
    assert_eq!(s.client.relay_nonce(&patient), 0);
}

#[test]
fn relayed_claim_pays_the_reward() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    mint(&env, &s.reward, &s.client.address, REWARD_AMOUNT);

    s.client.set_data_sharing(&patient, &true);
    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);

    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::ClaimReward,
        0,
        T0 + REWARD_COOLDOWN + 600,
    );
    s.client.execute_relayed(&s.relayer, &op);

    let reward = token::Client::new(&env, &s.reward);
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);
}

#[test]
fn relayed_symptom_submission_creates_the_record() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);

    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SubmitSymptoms(String::from_str(&env, "persistent cough")),
        0,
        T0 + 600,
    );
    s.client.execute_relayed(&s.relayer, &op);

    assert_eq!(s.client.get_analysis_count(), 1);
    assert_eq!(s.client.get_symptom_analysis(&1).patient, patient);
}

#[test]
fn admin_rotates_the_relayer() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let key = signing_key(42);
    let new_relayer = Address::generate(&env);

    s.client.set_relayer(&s.admin, &new_relayer);
    assert_eq!(s.client.get_relayer(), new_relayer);

    // The old relayer identity is dead.
    let op = signed_op(
        &env,
        &key,
        &patient,
        RelayedCall::SetDataSharing(true),
        0,
        T0 + 600,
    );
    let res = s.client.try_execute_relayed(&s.relayer, &op);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Unauthorized)));

    s.client.execute_relayed(&new_relayer, &op);
    assert!(s.client.get_patient(&patient).data_sharing);
}
