#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::test::{mint, register_patient, setup, verify_doctor, T0};
use super::*;
use soroban_sdk::testutils::{Events, Ledger};
use soroban_sdk::{symbol_short, token, Env, IntoVal, TryIntoVal};

fn fund_treasury(env: &Env, s: &super::test::Setup, amount: i128) {
    mint(env, &s.reward, &s.client.address, amount);
}

#[test]
fn claim_requires_data_sharing() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    fund_treasury(&env, &s, REWARD_AMOUNT);

    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::DataSharingDisabled)
    ));
}

#[test]
fn enabling_sharing_never_pays_instantly() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    fund_treasury(&env, &s, REWARD_AMOUNT);

    // Enabling stamps the cooldown clock; the first payout is earned a
    // full window later.
    s.client.set_data_sharing(&patient, &true);
    assert_eq!(s.client.get_patient(&patient).last_reward_at, T0);

    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::RewardCooldownActive)
    ));

    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);
    let paid = s.client.claim_data_reward(&patient);
    assert_eq!(paid, REWARD_AMOUNT);

    let reward = token::Client::new(&env, &s.reward);
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);
    assert_eq!(
        s.client.get_patient(&patient).last_reward_at,
        T0 + REWARD_COOLDOWN
    );
}

#[test]
fn claims_respect_the_rolling_cooldown() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    fund_treasury(&env, &s, 10 * REWARD_AMOUNT);
    s.client.set_data_sharing(&patient, &true);

    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);
    s.client.claim_data_reward(&patient);

    // One second short of the next window.
    env.ledger().set_timestamp(T0 + 2 * REWARD_COOLDOWN - 1);
    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::RewardCooldownActive)
    ));

    env.ledger().set_timestamp(T0 + 2 * REWARD_COOLDOWN);
    s.client.claim_data_reward(&patient);

    let reward = token::Client::new(&env, &s.reward);
    assert_eq!(reward.balance(&patient), 2 * REWARD_AMOUNT);
}

#[test]
fn claim_fails_on_an_exhausted_treasury() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    s.client.set_data_sharing(&patient, &true);
    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);

    // No treasury at all.
    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::InsufficientTreasury)
    ));

    // A partial treasury is just as exhausted.
    fund_treasury(&env, &s, REWARD_AMOUNT - 1);
    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::InsufficientTreasury)
    ));
}

#[test]
fn re_enabling_sharing_restarts_the_clock() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    fund_treasury(&env, &s, 10 * REWARD_AMOUNT);

    s.client.set_data_sharing(&patient, &true);
    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);

    // Toggling off and on again pushes the next payout a full window out.
    s.client.set_data_sharing(&patient, &false);
    s.client.set_data_sharing(&patient, &true);

    let res = s.client.try_claim_data_reward(&patient);
    assert!(matches!(
        res.unwrap_err(),
        Ok(ContractError::RewardCooldownActive)
    ));

    env.ledger().set_timestamp(T0 + 2 * REWARD_COOLDOWN);
    s.client.claim_data_reward(&patient);
}

#[test]
fn data_producing_actions_trigger_at_most_one_payout_per_window() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let doctor = verify_doctor(&env, &s, 50);
    fund_treasury(&env, &s, 10 * REWARD_AMOUNT);

    s.client.set_data_sharing(&patient, &true);
    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);

    // The first order pays the reward implicitly.
    s.client
        .order_lab_test(&doctor, &patient, &String::from_str(&env, "CBC"));
    let reward = token::Client::new(&env, &s.reward);
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);

    // The second order in the same window skips, observably.
    s.client
        .order_lab_test(&doctor, &patient, &String::from_str(&env, "CMP"));
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);

    let all = env.events().all();
    let last = all.get(all.len() - 1).unwrap();
    assert_eq!(
        last.1,
        (symbol_short!("RWD_SKIP"), patient.clone()).into_val(&env)
    );
    let payload: events::RewardSkippedEvent = last.2.try_into_val(&env).unwrap();
    assert_eq!(payload.reason, symbol_short!("cooldown"));
}

#[test]
fn fresh_enable_then_submission_pays_after_one_window() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    fund_treasury(&env, &s, 10 * REWARD_AMOUNT);
    let reward = token::Client::new(&env, &s.reward);

    s.client.set_data_sharing(&patient, &true);

    // A submission right after enabling does not pay.
    s.client
        .submit_symptom_analysis(&patient, &String::from_str(&env, "fatigue"));
    assert_eq!(reward.balance(&patient), 0);

    // One cooldown later it pays, exactly once.
    env.ledger().set_timestamp(T0 + REWARD_COOLDOWN);
    s.client
        .submit_symptom_analysis(&patient, &String::from_str(&env, "fatigue persists"));
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);

    s.client
        .submit_symptom_analysis(&patient, &String::from_str(&env, "third entry"));
    assert_eq!(reward.balance(&patient), REWARD_AMOUNT);
}

#[test]
fn implicit_trigger_never_fails_the_enclosing_operation() {
    let env = Env::default();
    let s = setup(&env);

    let patient = register_patient(&env, &s);
    let doctor = verify_doctor(&env, &s, 50);

    // Sharing disabled and an empty treasury: the order still succeeds.
    let id = s
        .client
        .order_lab_test(&doctor, &patient, &String::from_str(&env, "CBC"));
    assert_eq!(id, 1);

    let all = env.events().all();
    let last = all.get(all.len() - 1).unwrap();
    assert_eq!(
        last.1,
        (symbol_short!("RWD_SKIP"), patient.clone()).into_val(&env)
    );
    let payload: events::RewardSkippedEvent = last.2.try_into_val(&env).unwrap();
    assert_eq!(payload.reason, symbol_short!("sharing"));
}
