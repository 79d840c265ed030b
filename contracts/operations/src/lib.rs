//! Movly Operations Contract - Custodial Deposits and Signed Withdrawals
//!
//! This contract routes user deposits of the Movly CW20 token into a pooled
//! system wallet, and releases tokens from that pool only against a
//! withdrawal authorization signed by the designated off-chain signer.
//!
//! # Deposit Flow
//! 1. User grants this contract a CW20 allowance
//! 2. User calls `Deposit { amount }`
//! 3. Contract moves `amount` from the user to the system wallet
//!
//! # Withdrawal Flow
//! 1. Off-chain signer signs `(beneficiary, amount, nonce)` (EIP-191)
//! 2. Beneficiary calls `Withdraw { amount, nonce, signature }`
//! 3. Contract consumes the nonce, then moves `amount` from the system wallet
//!    (which granted this contract an allowance) to the beneficiary
//!
//! # Security
//! - Each nonce can be consumed exactly once
//! - Nonce is recorded before the token transfer is dispatched
//! - Signatures are recovered on-chain and compared to the configured signer
//! - Owner-only configuration of the system wallet and signer

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod signature;
pub mod state;

pub use crate::error::ContractError;
pub use common::{withdrawal_digest, withdrawal_message_hash, EvmAddress};
