//! Owner operations handlers.
//!
//! This module handles:
//! - System wallet rotation
//! - Signer rotation
//! - Ownership transfer and renouncement

use common::EvmAddress;
use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{Config, CONFIG};

fn load_config_as_owner(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if !config.is_owner(sender) {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

// ============================================================================
// Configuration
// ============================================================================

/// Replace the wallet holding the pooled custodial balance.
pub fn execute_set_system_wallet(
    deps: DepsMut,
    info: MessageInfo,
    new_wallet: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;

    let new_wallet = deps.api.addr_validate(&new_wallet)?;
    let old_wallet = std::mem::replace(&mut config.system_wallet, new_wallet.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "system_wallet_updated")
        .add_attribute("old", old_wallet)
        .add_attribute("new", new_wallet))
}

/// Replace the address whose signature authorizes withdrawals.
pub fn execute_set_signer(
    deps: DepsMut,
    info: MessageInfo,
    new_signer: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;

    let new_signer = EvmAddress::parse(&new_signer).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })?;
    let old_signer = std::mem::replace(&mut config.signer, new_signer);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "signer_updated")
        .add_attribute("old", old_signer.to_string())
        .add_attribute("new", new_signer.to_string()))
}

// ============================================================================
// Ownership
// ============================================================================

/// Hand ownership to `new_owner`, effective immediately.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    config.owner = Some(new_owner.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "ownership_transferred")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", new_owner))
}

/// Drop ownership. No owner-gated operation can succeed afterwards.
pub fn execute_renounce_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info.sender)?;

    config.owner = None;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "ownership_renounced")
        .add_attribute("previous_owner", info.sender))
}
