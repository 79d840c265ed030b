//! Withdrawal signature verification
//!
//! Signatures are 65 bytes `r || s || v` as produced by Ethereum
//! personal-message signing. Recovery uses the chain's native secp256k1
//! precompile (`Api::secp256k1_recover_pubkey`); the recovered key is turned
//! into an address and compared with the configured signer.
//!
//! Anything malformed is reported as `InvalidSignature`, never as a panic:
//! - length other than 65 bytes
//! - recovery parameter `v` outside `{0, 1, 27, 28}`
//! - `s` in the upper half of the curve order (malleable twin)
//! - recovery failure (zero `r`/`s`, point not on curve)

use common::{is_low_s, withdrawal_digest, EvmAddress};
use cosmwasm_std::Api;

use crate::error::ContractError;

/// Expected signature length in bytes
pub const SIGNATURE_LENGTH: usize = 65;

/// A parsed, well-formed signature ready for recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// `r || s`
    pub compact: [u8; 64],
    /// Recovery parameter normalized to 0 or 1
    pub recovery_param: u8,
}

impl RecoverableSignature {
    /// Split and validate a 65-byte signature.
    pub fn parse(signature: &[u8]) -> Result<Self, ContractError> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(ContractError::InvalidSignature);
        }

        let recovery_param = match signature[64] {
            0 | 27 => 0,
            1 | 28 => 1,
            _ => return Err(ContractError::InvalidSignature),
        };

        let mut compact = [0u8; 64];
        compact.copy_from_slice(&signature[..64]);

        let mut s = [0u8; 32];
        s.copy_from_slice(&compact[32..]);
        if !is_low_s(&s) {
            return Err(ContractError::InvalidSignature);
        }

        Ok(Self {
            compact,
            recovery_param,
        })
    }

    /// Recover the address that produced this signature over `digest`.
    pub fn recover(&self, api: &dyn Api, digest: &[u8; 32]) -> Result<EvmAddress, ContractError> {
        let pubkey = api
            .secp256k1_recover_pubkey(digest, &self.compact, self.recovery_param)
            .map_err(|_| ContractError::InvalidSignature)?;

        EvmAddress::from_uncompressed_pubkey(&pubkey).map_err(|_| ContractError::InvalidSignature)
    }
}

/// Verify that `signature` authorizes `beneficiary` to withdraw `amount`
/// under `nonce`, signed by `expected_signer`.
pub fn verify_withdrawal_signature(
    api: &dyn Api,
    expected_signer: &EvmAddress,
    beneficiary: &str,
    amount: u128,
    nonce: u64,
    signature: &[u8],
) -> Result<(), ContractError> {
    let parsed = RecoverableSignature::parse(signature)?;
    let digest = withdrawal_digest(beneficiary, amount, nonce);
    let recovered = parsed.recover(api, &digest)?;

    if recovered != *expected_signer {
        return Err(ContractError::InvalidSignature);
    }

    Ok(())
}
