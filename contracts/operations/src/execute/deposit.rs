//! Deposit handler.
//!
//! Deposits pull tokens from the caller straight into the system wallet using
//! the allowance the caller granted this contract. The contract itself never
//! holds the deposited tokens.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::execute::transfer_from_msg;
use crate::state::{CONFIG, DEPOSIT_REPLY_ID};

/// Move `amount` tokens from the sender to the system wallet.
pub fn execute_deposit(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }

    let config = CONFIG.load(deps.storage)?;

    let transfer = transfer_from_msg(
        &config.token,
        &info.sender,
        &config.system_wallet,
        amount,
        DEPOSIT_REPLY_ID,
    )?;

    Ok(Response::new()
        .add_submessage(transfer)
        .add_attribute("action", "deposit")
        .add_attribute("depositor", info.sender)
        .add_attribute("amount", amount.to_string()))
}
