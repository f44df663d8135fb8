//! Emergency pause switch.
//!
//! A single global flag suspends every mutating entry point; views stay
//! available. Only the Admin role may flip it.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;
use crate::{events, rbac};

const PAUSED: Symbol = symbol_short!("P_GLOB");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Asserts the contract is currently accepting mutations.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn pause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    rbac::require_admin(env, caller)?;
    env.storage().instance().set(&PAUSED, &true);
    events::publish_paused(env, caller.clone());
    Ok(())
}

pub fn resume(env: &Env, caller: &Address) -> Result<(), ContractError> {
    rbac::require_admin(env, caller)?;
    env.storage().instance().set(&PAUSED, &false);
    events::publish_resumed(env, caller.clone());
    Ok(())
}
