//! Movly Signer - Library interface
//!
//! Produces and checks the withdrawal authorizations accepted by the Movly
//! operations contract. Key custody is out of scope: the key is supplied by
//! the caller (or the environment, for the CLI).

pub mod config;
pub mod signer;

pub use signer::{
    decode_signature_hex, recover_signer, verify_authorization, SignerError,
    WithdrawalAuthorization, WithdrawalSigner,
};
