//! Payment settlement.
//!
//! Fees are pulled from the payer into the contract's custody with an
//! allowance-style transfer; a failed transfer aborts the whole operation
//! with `TransferFailed`. Overpayment is never pushed back: the excess is
//! credited to a per-(payer, asset) refund ledger and withdrawn later by
//! the payer, which keeps a refund-rejecting recipient from wedging the
//! enclosing operation.

use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;
use crate::types::PaymentAsset;
use crate::{events, storage};

/// Settles `fee` in `asset` from `payer`, pulling `amount` and crediting
/// the excess to the payer's refund ledger.
pub fn settle(
    env: &Env,
    payer: &Address,
    asset: &PaymentAsset,
    amount: i128,
    fee: i128,
) -> Result<(), ContractError> {
    if amount < fee {
        return Err(ContractError::InsufficientFunds);
    }

    let token_address = storage::token_address(env, asset)?;
    let client = token::Client::new(env, &token_address);
    if client
        .try_transfer(payer, &env.current_contract_address(), &amount)
        .is_err()
    {
        return Err(ContractError::TransferFailed);
    }

    let excess = amount.saturating_sub(fee);
    if excess > 0 {
        storage::credit_refund(env, payer, asset, excess);
        events::publish_refund_credited(env, payer.clone(), asset.clone(), excess);
    }

    Ok(())
}

/// Credits `amount` of `asset` back to `account` (cancellation refunds).
pub fn credit_refund(env: &Env, account: &Address, asset: &PaymentAsset, amount: i128) {
    if amount > 0 {
        storage::credit_refund(env, account, asset, amount);
        events::publish_refund_credited(env, account.clone(), asset.clone(), amount);
    }
}

/// Pays out the caller's accumulated refund balance for `asset`.
///
/// Fails with `NothingToWithdraw` when the balance is zero. The balance is
/// zeroed before the transfer; a failed transfer aborts the transaction,
/// which restores it.
pub fn withdraw_refund(
    env: &Env,
    caller: &Address,
    asset: &PaymentAsset,
) -> Result<i128, ContractError> {
    let amount = storage::take_refund(env, caller, asset);
    if amount <= 0 {
        return Err(ContractError::NothingToWithdraw);
    }

    let token_address = storage::token_address(env, asset)?;
    let client = token::Client::new(env, &token_address);
    if client
        .try_transfer(&env.current_contract_address(), caller, &amount)
        .is_err()
    {
        return Err(ContractError::TransferFailed);
    }

    events::publish_refund_withdrawn(env, caller.clone(), asset.clone(), amount);
    Ok(amount)
}

/// Current custody balance of the contract in `asset`.
pub fn treasury_balance(env: &Env, asset: &PaymentAsset) -> Result<i128, ContractError> {
    let token_address = storage::token_address(env, asset)?;
    Ok(token::Client::new(env, &token_address).balance(&env.current_contract_address()))
}
