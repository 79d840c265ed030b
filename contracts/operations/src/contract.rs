//! Movly Operations Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `signature` - Withdrawal signature recovery

use common::EvmAddress;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, SubMsgResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_deposit, execute_renounce_ownership, execute_set_signer, execute_set_system_wallet,
    execute_transfer_ownership, execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_nonce_used, query_owner, query_pool, query_used_nonces,
    query_withdrawal_hash,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEPOSIT_REPLY_ID, WITHDRAW_REPLY_ID,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let token = deps.api.addr_validate(&msg.token)?;
    let system_wallet = deps.api.addr_validate(&msg.system_wallet)?;
    let signer = EvmAddress::parse(&msg.signer).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })?;

    let config = Config {
        token,
        system_wallet,
        signer,
        owner: Some(info.sender.clone()),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("token", config.token)
        .add_attribute("system_wallet", config.system_wallet)
        .add_attribute("signer", config.signer.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // User operations
        ExecuteMsg::Deposit { amount } => execute_deposit(deps, info, amount),
        ExecuteMsg::Withdraw {
            amount,
            nonce,
            signature,
        } => execute_withdraw(deps, info, amount, nonce, signature),

        // Owner operations
        ExecuteMsg::SetSystemWallet { new_wallet } => {
            execute_set_system_wallet(deps, info, new_wallet)
        }
        ExecuteMsg::SetSigner { new_signer } => execute_set_signer(deps, info, new_signer),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::RenounceOwnership {} => execute_renounce_ownership(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Token transfers are dispatched with `reply_on_error`; any reply here is a
/// failed transfer. Returning an error aborts the transaction, rolling back
/// everything the originating handler wrote (including a consumed nonce).
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match (msg.id, msg.result) {
        (DEPOSIT_REPLY_ID | WITHDRAW_REPLY_ID, SubMsgResult::Err(reason)) => {
            Err(ContractError::TransferFailed { reason })
        }
        (DEPOSIT_REPLY_ID | WITHDRAW_REPLY_ID, SubMsgResult::Ok(_)) => Ok(Response::new()),
        (id, _) => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
        QueryMsg::NonceUsed { nonce } => to_json_binary(&query_nonce_used(deps, nonce)?),
        QueryMsg::UsedNonces { start_after, limit } => {
            to_json_binary(&query_used_nonces(deps, start_after, limit)?)
        }
        QueryMsg::WithdrawalHash {
            beneficiary,
            amount,
            nonce,
        } => to_json_binary(&query_withdrawal_hash(deps, beneficiary, amount, nonce)?),
        QueryMsg::Pool {} => to_json_binary(&query_pool(deps, env)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
