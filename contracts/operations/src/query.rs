//! Query handlers for the Movly operations contract.

use cosmwasm_std::{Deps, Env, Order, StdResult, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg};
use cw_storage_plus::Bound;

use common::{eth_signed_message_hash, withdrawal_message_hash};

use crate::msg::{
    ConfigResponse, NonceUsedResponse, OwnerResponse, PoolResponse, UsedNoncesResponse,
    WithdrawalHashResponse,
};
use crate::state::{CONFIG, USED_NONCES};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Configuration Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        system_wallet: config.system_wallet,
        signer: config.signer,
        owner: config.owner,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OwnerResponse {
        owner: config.owner,
    })
}

// ============================================================================
// Nonce Queries
// ============================================================================

/// Query whether a withdrawal nonce has been consumed.
pub fn query_nonce_used(deps: Deps, nonce: u64) -> StdResult<NonceUsedResponse> {
    Ok(NonceUsedResponse {
        nonce,
        used: USED_NONCES.has(deps.storage, nonce),
    })
}

/// Query paginated list of consumed nonces.
pub fn query_used_nonces(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<UsedNoncesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let nonces = USED_NONCES
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<u64>>>()?;

    Ok(UsedNoncesResponse { nonces })
}

// ============================================================================
// Signing Helpers
// ============================================================================

/// Compute the hashes a withdrawal signature covers.
pub fn query_withdrawal_hash(
    deps: Deps,
    beneficiary: String,
    amount: Uint128,
    nonce: u64,
) -> StdResult<WithdrawalHashResponse> {
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    let message_hash = withdrawal_message_hash(beneficiary.as_str(), amount.u128(), nonce);
    let digest = eth_signed_message_hash(&message_hash);

    Ok(WithdrawalHashResponse {
        message_hash: format!("0x{}", hex::encode(message_hash)),
        digest: format!("0x{}", hex::encode(digest)),
    })
}

// ============================================================================
// Pool Queries
// ============================================================================

/// Query the pooled balance and the allowance backing withdrawals.
pub fn query_pool(deps: Deps, env: Env) -> StdResult<PoolResponse> {
    let config = CONFIG.load(deps.storage)?;

    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        &config.token,
        &Cw20QueryMsg::Balance {
            address: config.system_wallet.to_string(),
        },
    )?;

    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        &config.token,
        &Cw20QueryMsg::Allowance {
            owner: config.system_wallet.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;

    Ok(PoolResponse {
        system_wallet: config.system_wallet,
        balance: balance.balance,
        allowance: allowance.allowance,
    })
}
