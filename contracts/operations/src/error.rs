//! Error types for the Movly operations contract

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: caller is not the owner")]
    Unauthorized,

    // ========================================================================
    // Deposit / Withdrawal Errors
    // ========================================================================
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Nonce already used: {nonce}")]
    NonceAlreadyUsed { nonce: u64 },

    #[error("Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
