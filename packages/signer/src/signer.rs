//! Withdrawal Signing Module
//!
//! Wraps alloy's `PrivateKeySigner`. The signer signs the withdrawal message
//! hash as an EIP-191 personal message, which is exactly the digest the
//! contract recovers against (`common::withdrawal_digest`).

use alloy::primitives::{PrimitiveSignature, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::{is_low_s, withdrawal_digest, withdrawal_message_hash, EvmAddress};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Signing failed: {0}")]
    Signing(#[from] alloy::signers::Error),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] common::AddressError),

    #[error("Signature recovers to {recovered}, expected {expected}")]
    SignerMismatch {
        recovered: EvmAddress,
        expected: EvmAddress,
    },
}

/// Decode a hex signature, with or without 0x prefix.
pub fn decode_signature_hex(signature: &str) -> Result<Vec<u8>, SignerError> {
    let trimmed = signature.trim();
    let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(hex_str).map_err(|e| SignerError::InvalidSignature(e.to_string()))
}

/// A signed `(beneficiary, amount, nonce)` triple, ready to be submitted by
/// the beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalAuthorization {
    pub beneficiary: String,
    /// Base units, as a decimal string (matches `Uint128` JSON)
    pub amount: String,
    pub nonce: u64,
    /// 65-byte `r || s || v` signature, 0x-prefixed hex
    pub signature: String,
    /// Address that produced the signature
    pub signer: EvmAddress,
}

impl WithdrawalAuthorization {
    /// Raw signature bytes.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, SignerError> {
        decode_signature_hex(&self.signature)
    }

    /// JSON body of the contract's `withdraw` execute message.
    pub fn to_execute_msg_json(&self) -> Result<serde_json::Value, SignerError> {
        let signature = self.signature_bytes()?;
        Ok(serde_json::json!({
            "withdraw": {
                "amount": self.amount,
                "nonce": self.nonce,
                "signature": BASE64.encode(signature),
            }
        }))
    }

    /// Output of `movly-signer sign`: the authorization alongside the
    /// ready-to-submit execute message.
    pub fn to_sign_output(&self) -> Result<serde_json::Value, SignerError> {
        Ok(serde_json::json!({
            "authorization": self,
            "execute_msg": self.to_execute_msg_json()?,
        }))
    }
}

/// Holds the withdrawal signing key.
pub struct WithdrawalSigner {
    inner: PrivateKeySigner,
}

impl WithdrawalSigner {
    /// Load from a hex private key (with or without 0x prefix).
    pub fn from_private_key(private_key: &str) -> Result<Self, SignerError> {
        let inner: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| SignerError::InvalidPrivateKey(format!("{}", e)))?;
        Ok(Self { inner })
    }

    /// Generate a fresh random key.
    pub fn random() -> Self {
        Self {
            inner: PrivateKeySigner::random(),
        }
    }

    /// Address the contract must be configured with to accept this signer.
    pub fn address(&self) -> EvmAddress {
        let address = self.inner.address();
        EvmAddress::new(address.into_array())
    }

    /// Hex-encoded private key, 0x-prefixed.
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.inner.credential().to_bytes()))
    }

    /// Sign a withdrawal of `amount` to `beneficiary` under `nonce`.
    pub fn sign_withdrawal(
        &self,
        beneficiary: &str,
        amount: u128,
        nonce: u64,
    ) -> Result<WithdrawalAuthorization, SignerError> {
        let message_hash = withdrawal_message_hash(beneficiary, amount, nonce);
        let signature = self.inner.sign_message_sync(&message_hash)?;

        debug!(
            beneficiary,
            amount = %amount,
            nonce,
            message_hash = %format!("0x{}", hex::encode(message_hash)),
            "Signed withdrawal"
        );

        Ok(WithdrawalAuthorization {
            beneficiary: beneficiary.to_string(),
            amount: amount.to_string(),
            nonce,
            signature: format!("0x{}", hex::encode(signature.as_bytes())),
            signer: self.address(),
        })
    }
}

/// Recover the address that signed a withdrawal authorization.
///
/// Applies the contract's acceptance rules: 65 bytes, `v` in
/// `{0, 1, 27, 28}` and low `s`. A signature rejected here is rejected
/// on-chain.
pub fn recover_signer(
    beneficiary: &str,
    amount: u128,
    nonce: u64,
    signature: &[u8],
) -> Result<EvmAddress, SignerError> {
    if signature.len() != 65 {
        return Err(SignerError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            signature.len()
        )));
    }

    let mut s = [0u8; 32];
    s.copy_from_slice(&signature[32..64]);
    if !is_low_s(&s) {
        return Err(SignerError::InvalidSignature(
            "s is in the upper half of the curve order".to_string(),
        ));
    }

    let signature = PrimitiveSignature::try_from(signature)
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;

    let digest = B256::from(withdrawal_digest(beneficiary, amount, nonce));
    let address = signature
        .recover_address_from_prehash(&digest)
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;

    Ok(EvmAddress::new(address.into_array()))
}

/// Recover the signer and, when `expected` is given, require a match.
pub fn verify_authorization(
    beneficiary: &str,
    amount: u128,
    nonce: u64,
    signature: &[u8],
    expected: Option<&EvmAddress>,
) -> Result<EvmAddress, SignerError> {
    let recovered = recover_signer(beneficiary, amount, nonce, signature)?;

    match expected {
        Some(expected) if *expected != recovered => Err(SignerError::SignerMismatch {
            recovered,
            expected: *expected,
        }),
        _ => Ok(recovered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_known_key_address() {
        let signer = WithdrawalSigner::from_private_key(KEY_ONE).unwrap();
        assert_eq!(
            signer.address().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_private_key_round_trip() {
        let signer = WithdrawalSigner::random();
        let reloaded = WithdrawalSigner::from_private_key(&signer.private_key_hex()).unwrap();
        assert_eq!(signer.address(), reloaded.address());
    }

    #[test]
    fn test_invalid_private_key() {
        let result = WithdrawalSigner::from_private_key("0xnothex");
        assert!(matches!(result, Err(SignerError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_sign_and_recover() {
        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 1).unwrap();

        let sig = auth.signature_bytes().unwrap();
        assert_eq!(sig.len(), 65);
        assert!(sig[64] == 27 || sig[64] == 28);

        let recovered = recover_signer("terra1user", 100, 1, &sig).unwrap();
        assert_eq!(recovered, signer.address());
        assert_eq!(auth.signer, signer.address());
    }

    #[test]
    fn test_signature_bound_to_fields() {
        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 1).unwrap();
        let sig = auth.signature_bytes().unwrap();

        for (beneficiary, amount, nonce) in
            [("terra1other", 100u128, 1u64), ("terra1user", 101, 1), ("terra1user", 100, 2)]
        {
            let recovered = recover_signer(beneficiary, amount, nonce, &sig).unwrap();
            assert_ne!(recovered, signer.address());
        }
    }

    #[test]
    fn test_recover_rejects_short_signature() {
        let result = recover_signer("terra1user", 100, 1, &[0u8; 10]);
        assert!(matches!(result, Err(SignerError::InvalidSignature(_))));
    }

    #[test]
    fn test_recover_rejects_high_s_twin() {
        use alloy::primitives::U256;

        const SECP256K1_ORDER: [u8; 32] = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c,
            0xd0, 0x36, 0x41, 0x41,
        ];

        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 1).unwrap();
        let sig = auth.signature_bytes().unwrap();

        // (r, n - s, !v) recovers the same key under plain ECDSA
        let n = U256::from_be_bytes(SECP256K1_ORDER);
        let s = U256::from_be_slice(&sig[32..64]);
        let mut twin = sig.clone();
        twin[32..64].copy_from_slice(&(n - s).to_be_bytes::<32>());
        twin[64] = if sig[64] == 27 { 28 } else { 27 };

        let result = recover_signer("terra1user", 100, 1, &twin);
        assert!(matches!(result, Err(SignerError::InvalidSignature(_))));

        let result = verify_authorization("terra1user", 100, 1, &twin, Some(&signer.address()));
        assert!(matches!(result, Err(SignerError::InvalidSignature(_))));
    }

    #[test]
    fn test_verify_authorization_expected_signer() {
        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 1).unwrap();
        let sig = decode_signature_hex(&auth.signature).unwrap();

        let recovered =
            verify_authorization("terra1user", 100, 1, &sig, Some(&signer.address())).unwrap();
        assert_eq!(recovered, signer.address());

        let recovered = verify_authorization("terra1user", 100, 1, &sig, None).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_verify_authorization_mismatch() {
        let signer = WithdrawalSigner::random();
        let other = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 1).unwrap();
        let sig = auth.signature_bytes().unwrap();

        let err = verify_authorization("terra1user", 100, 1, &sig, Some(&other.address()))
            .unwrap_err();
        match err {
            SignerError::SignerMismatch {
                recovered,
                expected,
            } => {
                assert_eq!(recovered, signer.address());
                assert_eq!(expected, other.address());
            }
            err => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn test_decode_signature_hex() {
        assert_eq!(decode_signature_hex(" 0x0a0b ").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode_signature_hex("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(matches!(
            decode_signature_hex("0xzz"),
            Err(SignerError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_sign_output_shape() {
        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 250, 3).unwrap();
        let output = auth.to_sign_output().unwrap();

        assert_eq!(output["authorization"]["beneficiary"], "terra1user");
        assert_eq!(output["authorization"]["amount"], "250");
        assert_eq!(output["authorization"]["nonce"], 3);
        assert_eq!(output["authorization"]["signature"], auth.signature.as_str());
        assert_eq!(
            output["authorization"]["signer"],
            signer.address().to_string()
        );
        assert_eq!(output["execute_msg"], auth.to_execute_msg_json().unwrap());
    }

    #[test]
    fn test_execute_msg_shape() {
        let signer = WithdrawalSigner::random();
        let auth = signer.sign_withdrawal("terra1user", 100, 7).unwrap();
        let msg = auth.to_execute_msg_json().unwrap();

        assert_eq!(msg["withdraw"]["amount"], "100");
        assert_eq!(msg["withdraw"]["nonce"], 7);

        let encoded = msg["withdraw"]["signature"].as_str().unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(decoded, auth.signature_bytes().unwrap());
    }
}
