//! Scoped re-entrancy guard for funds-moving entry points.
//!
//! Booking, reward claims, and refund withdrawals all transfer tokens;
//! each runs inside [`non_reentrant`], which holds an instance-storage
//! flag for the duration of the closure. A nested acquisition fails with
//! `ReentrancyDetected`. The flag is released on both success and error
//! paths; on error the host additionally rolls the whole transaction back.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

const ENTERED: Symbol = symbol_short!("ENTERED");

pub fn non_reentrant<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    if env.storage().instance().get(&ENTERED).unwrap_or(false) {
        return Err(ContractError::ReentrancyDetected);
    }
    env.storage().instance().set(&ENTERED, &true);
    let result = f();
    env.storage().instance().set(&ENTERED, &false);
    result
}
