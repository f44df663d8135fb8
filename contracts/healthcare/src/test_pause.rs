#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::test::{mint, register_patient, setup, verify_doctor, T0};
use super::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Bytes, Env};

#[test]
fn only_the_admin_flips_the_switch() {
    let env = Env::default();
    let s = setup(&env);

    let outsider = Address::generate(&env);
    let res = s.client.try_pause(&outsider);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Unauthorized)));
    assert!(!s.client.is_paused());

    s.client.pause(&s.admin);
    let res = s.client.try_resume(&outsider);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Unauthorized)));
    assert!(s.client.is_paused());
}

#[test]
fn pause_blocks_mutations_but_not_views() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let doctor = verify_doctor(&env, &s, 50);
    mint(&env, &s.native, &patient, 1_000);

    let id = s.client.book_appointment(
        &patient,
        &doctor,
        &(T0 + 3_600),
        &PaymentAsset::Native,
        &50,
        &false,
    );

    s.client.pause(&s.admin);

    let newcomer = Address::generate(&env);
    let res = s
        .client
        .try_register_patient(&newcomer, &Bytes::from_slice(&env, &[1u8; 32]));
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Paused)));

    let res = s.client.try_confirm_appointment(&doctor, &id);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Paused)));

    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Paused)));

    let res = s
        .client
        .try_withdraw_refund(&patient, &PaymentAsset::Native);
    assert!(matches!(res.unwrap_err(), Ok(ContractError::Paused)));

    // Reads stay available while paused.
    assert!(s.client.is_paused());
    assert_eq!(s.client.get_admin(), s.admin);
    assert_eq!(s.client.get_appointment(&id).patient, patient);
    assert_eq!(s.client.get_appointment_count(), 1);
}

#[test]
fn resume_restores_the_full_surface() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let doctor = verify_doctor(&env, &s, 50);
    mint(&env, &s.native, &patient, 1_000);

    s.client.pause(&s.admin);
    s.client.resume(&s.admin);
    assert!(!s.client.is_paused());

    let id = s.client.book_appointment(
        &patient,
        &doctor,
        &(T0 + 3_600),
        &PaymentAsset::Native,
        &50,
        &false,
    );
    assert_eq!(id, 1);
}
