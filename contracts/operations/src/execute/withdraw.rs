//! Withdrawal handler.
//!
//! A withdrawal is authorized by the configured signer's signature over
//! `(beneficiary, amount, nonce)`, where the beneficiary is always the caller.
//! The nonce is written to storage before the token transfer is queued; the
//! transfer only runs after this handler returns, so a re-entrant withdraw
//! with the same nonce always observes it as used. If the transfer fails the
//! whole transaction, nonce included, is rolled back.

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::transfer_from_msg;
use crate::signature::verify_withdrawal_signature;
use crate::state::{CONFIG, USED_NONCES, WITHDRAW_REPLY_ID};

/// Move `amount` tokens from the system wallet to the sender.
pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
    nonce: u64,
    signature: Binary,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }

    let config = CONFIG.load(deps.storage)?;

    if USED_NONCES.has(deps.storage, nonce) {
        return Err(ContractError::NonceAlreadyUsed { nonce });
    }

    verify_withdrawal_signature(
        deps.api,
        &config.signer,
        info.sender.as_str(),
        amount.u128(),
        nonce,
        signature.as_slice(),
    )?;

    USED_NONCES.save(deps.storage, nonce, &true)?;

    let transfer = transfer_from_msg(
        &config.token,
        &config.system_wallet,
        &info.sender,
        amount,
        WITHDRAW_REPLY_ID,
    )?;

    Ok(Response::new()
        .add_submessage(transfer)
        .add_attribute("action", "withdrawal")
        .add_attribute("beneficiary", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("nonce", nonce.to_string()))
}
