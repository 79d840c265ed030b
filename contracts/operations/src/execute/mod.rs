//! Execute handlers for the Movly operations contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `deposit` - Deposit into the pooled system wallet
//! - `withdraw` - Signature-authorized withdrawal from the pool
//! - `admin` - Owner-only system wallet, signer and ownership changes

mod admin;
mod deposit;
mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use withdraw::*;

use cosmwasm_std::{to_json_binary, Addr, StdResult, SubMsg, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

/// CW20 `TransferFrom` dispatched as a sub-message so a token-side failure
/// comes back through `reply` and surfaces as `TransferFailed`.
pub(crate) fn transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
    reply_id: u64,
) -> StdResult<SubMsg> {
    let msg = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    };
    Ok(SubMsg::reply_on_error(msg, reply_id))
}
