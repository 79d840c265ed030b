//! Common - Shared Types and Utilities for Movly Operations
//!
//! This package holds the one definition of the withdrawal authorization
//! message, used by the on-chain contract to verify signatures and by the
//! off-chain signer to produce them.

pub mod address;
pub mod authorization;

pub use address::{AddressError, EvmAddress};
pub use authorization::{
    eth_signed_message_hash, is_low_s, keccak256, withdrawal_digest, withdrawal_message_hash,
    SECP256K1_HALF_ORDER,
};
