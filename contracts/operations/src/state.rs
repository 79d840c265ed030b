//! State definitions for the Movly operations contract

use common::EvmAddress;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// CW20 token moved by deposits and withdrawals (fixed at instantiation)
    pub token: Addr,
    /// Wallet holding the pooled custodial balance
    pub system_wallet: Addr,
    /// Address whose signature authorizes withdrawals
    pub signer: EvmAddress,
    /// Administrative identity; `None` once ownership is renounced
    pub owner: Option<Addr>,
}

impl Config {
    pub fn is_owner(&self, sender: &Addr) -> bool {
        self.owner.as_ref() == Some(sender)
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:movly-operations";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for the deposit `TransferFrom` sub-message
pub const DEPOSIT_REPLY_ID: u64 = 1;

/// Reply id for the withdrawal `TransferFrom` sub-message
pub const WITHDRAW_REPLY_ID: u64 = 2;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Consumed withdrawal nonces. Entries are only ever inserted.
/// Key: nonce, Value: always true
pub const USED_NONCES: Map<u64, bool> = Map::new("used_nonces");
