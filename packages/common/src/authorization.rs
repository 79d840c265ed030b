//! Withdrawal authorization message
//!
//! The off-chain signer authorizes a withdrawal by signing the EIP-191
//! personal-message digest of a fixed 96-byte encoding:
//!
//! ```text
//! message_hash = keccak256(beneficiary_hash || amount || nonce)
//! digest       = keccak256("\x19Ethereum Signed Message:\n32" || message_hash)
//! ```
//!
//! # Byte Layout (96 bytes total)
//! - Bytes 0-31:  keccak256 of the beneficiary address string (UTF-8)
//! - Bytes 32-63: amount (uint256, big-endian, left-padded)
//! - Bytes 64-95: nonce (uint256, big-endian, left-padded)
//!
//! The personal-message prefix keeps a withdrawal authorization from ever
//! being valid as a raw transaction signature, and vice versa.

use tiny_keccak::{Hasher, Keccak};

/// EIP-191 prefix for a 32-byte message
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// secp256k1 curve order divided by two (big-endian)
pub const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Whether a big-endian 32-byte `s` lies in the lower half of the curve
/// order. Only low-`s` signatures authorize withdrawals.
pub fn is_low_s(s: &[u8; 32]) -> bool {
    // Byte-wise comparison is numeric comparison for equal-length big-endian
    s[..] <= SECP256K1_HALF_ORDER[..]
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash of the `(beneficiary, amount, nonce)` triple that the signer signs.
pub fn withdrawal_message_hash(beneficiary: &str, amount: u128, nonce: u64) -> [u8; 32] {
    let mut data = [0u8; 96];

    data[0..32].copy_from_slice(&keccak256(beneficiary.as_bytes()));

    // u128 (16 bytes) goes into bytes 48-63, bytes 32-47 remain zero
    data[32 + 16..64].copy_from_slice(&amount.to_be_bytes());

    // u64 (8 bytes) goes into bytes 88-95, bytes 64-87 remain zero
    data[64 + 24..96].copy_from_slice(&nonce.to_be_bytes());

    keccak256(&data)
}

/// Apply the EIP-191 personal-message envelope to a 32-byte hash.
pub fn eth_signed_message_hash(message_hash: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 60];
    data[..28].copy_from_slice(PERSONAL_MESSAGE_PREFIX);
    data[28..].copy_from_slice(message_hash);
    keccak256(&data)
}

/// The digest a valid withdrawal signature is recovered against.
pub fn withdrawal_digest(beneficiary: &str, amount: u128, nonce: u64) -> [u8; 32] {
    eth_signed_message_hash(&withdrawal_message_hash(beneficiary, amount, nonce))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_low_s_boundary() {
        assert!(is_low_s(&SECP256K1_HALF_ORDER));
        assert!(is_low_s(&[0u8; 32]));

        let mut above = SECP256K1_HALF_ORDER;
        above[31] += 1;
        assert!(!is_low_s(&above));
        assert!(!is_low_s(&[0xff; 32]));
    }

    #[test]
    fn test_prefix_length() {
        assert_eq!(PERSONAL_MESSAGE_PREFIX.len(), 28);
    }

    #[test]
    fn test_withdrawal_message_hash_vector() {
        let hash = withdrawal_message_hash("terra1user", 100, 1);
        assert_eq!(
            hex::encode(hash),
            "2e628c4125dc7a3ada8a297a5d56dea72b8aeeb84d6bcae0a39b8bf3d4c29e2c"
        );
    }

    #[test]
    fn test_withdrawal_message_hash_empty_vector() {
        let hash = withdrawal_message_hash("", 0, 0);
        assert_eq!(
            hex::encode(hash),
            "21299646649cf18204413b4b73da7fe9f3ec729e1a69e11199a8c5607573923a"
        );
    }

    #[test]
    fn test_withdrawal_digest_vector() {
        let digest = withdrawal_digest("terra1user", 100, 1);
        assert_eq!(
            hex::encode(digest),
            "f156cfc77760591cf30f31fbf57e2dc7a65767ce068a09727e4364a350d2d014"
        );
    }

    #[test]
    fn test_fields_are_bound() {
        let base = withdrawal_message_hash("terra1user", 100, 1);
        assert_ne!(base, withdrawal_message_hash("terra1other", 100, 1));
        assert_ne!(base, withdrawal_message_hash("terra1user", 101, 1));
        assert_ne!(base, withdrawal_message_hash("terra1user", 100, 2));
    }

    #[test]
    fn test_digest_differs_from_message_hash() {
        let hash = withdrawal_message_hash("terra1user", 100, 1);
        assert_ne!(hash, eth_signed_message_hash(&hash));
    }
}
