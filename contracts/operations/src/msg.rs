//! Message types for the Movly operations contract

use common::EvmAddress;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
///
/// The instantiating sender becomes the owner.
#[cw_serde]
pub struct InstantiateMsg {
    /// CW20 token contract address
    pub token: String,
    /// Wallet holding the pooled custodial balance
    pub system_wallet: String,
    /// Withdrawal signer as a 0x-prefixed 20-byte hex address
    pub signer: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // User Operations
    // ========================================================================
    /// Move `amount` tokens from the sender to the system wallet.
    ///
    /// Authorization: Anyone (requires a prior CW20 allowance to this contract)
    Deposit { amount: Uint128 },

    /// Move `amount` tokens from the system wallet to the sender.
    ///
    /// Authorization: Anyone holding a signature by the configured signer over
    /// `(sender, amount, nonce)`. Each nonce is accepted once.
    Withdraw {
        amount: Uint128,
        nonce: u64,
        /// 65-byte `r || s || v` signature
        signature: Binary,
    },

    // ========================================================================
    // Owner Operations
    // ========================================================================
    /// Replace the system wallet.
    SetSystemWallet { new_wallet: String },

    /// Replace the withdrawal signer.
    SetSigner { new_signer: String },

    /// Hand ownership to another address.
    TransferOwnership { new_owner: String },

    /// Give up ownership. Owner-gated operations become unavailable.
    RenounceOwnership {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the current owner
    #[returns(OwnerResponse)]
    Owner {},

    /// Returns whether a nonce has been consumed
    #[returns(NonceUsedResponse)]
    NonceUsed { nonce: u64 },

    /// Returns consumed nonces in ascending order
    #[returns(UsedNoncesResponse)]
    UsedNonces {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Computes the message hash and EIP-191 digest a signer must sign
    #[returns(WithdrawalHashResponse)]
    WithdrawalHash {
        beneficiary: String,
        amount: Uint128,
        nonce: u64,
    },

    /// Returns the system wallet's token balance and the allowance it has
    /// granted this contract
    #[returns(PoolResponse)]
    Pool {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub system_wallet: Addr,
    pub signer: EvmAddress,
    pub owner: Option<Addr>,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Option<Addr>,
}

#[cw_serde]
pub struct NonceUsedResponse {
    pub nonce: u64,
    pub used: bool,
}

#[cw_serde]
pub struct UsedNoncesResponse {
    pub nonces: Vec<u64>,
}

#[cw_serde]
pub struct WithdrawalHashResponse {
    /// keccak256 of the encoded `(beneficiary, amount, nonce)` (0x hex)
    pub message_hash: String,
    /// EIP-191 digest the signature is recovered against (0x hex)
    pub digest: String,
}

#[cw_serde]
pub struct PoolResponse {
    pub system_wallet: Addr,
    /// Token balance of the system wallet
    pub balance: Uint128,
    /// Allowance the system wallet granted this contract
    pub allowance: Uint128,
}
