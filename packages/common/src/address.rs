//! EVM-style signer addresses
//!
//! The withdrawal signer is identified the way Ethereum identifies accounts:
//! the last 20 bytes of `keccak256` over the 64-byte uncompressed secp256k1
//! public key (without the `0x04` tag).

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::authorization::keccak256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid EVM address length: expected 40 hex chars, got {got}")]
    InvalidLength { got: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid public key: expected 65-byte uncompressed key")]
    InvalidPublicKey,
}

/// 20-byte account address, serialized as a lowercase `0x`-prefixed hex string.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct EvmAddress([u8; 20]);

impl EvmAddress {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a hex address, with or without `0x`. Mixed case is accepted
    /// without checksum validation.
    pub fn parse(addr: &str) -> Result<Self, AddressError> {
        let trimmed = addr.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_str.len() != 40 {
            return Err(AddressError::InvalidLength { got: hex_str.len() });
        }

        let bytes = hex::decode(hex_str).map_err(|e| AddressError::InvalidHex(e.to_string()))?;

        let mut result = [0u8; 20];
        result.copy_from_slice(&bytes);
        Ok(Self(result))
    }

    /// Derive the address of an uncompressed secp256k1 public key
    /// (`0x04 || X || Y`, 65 bytes).
    pub fn from_uncompressed_pubkey(pubkey: &[u8]) -> Result<Self, AddressError> {
        if pubkey.len() != 65 || pubkey[0] != 0x04 {
            return Err(AddressError::InvalidPublicKey);
        }

        let hash = keccak256(&pubkey[1..]);
        let mut result = [0u8; 20];
        result.copy_from_slice(&hash[12..]);
        Ok(Self(result))
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for EvmAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EvmAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EvmAddress> for String {
    fn from(addr: EvmAddress) -> Self {
        addr.to_string()
    }
}

impl JsonSchema for EvmAddress {
    fn schema_name() -> String {
        "EvmAddress".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// secp256k1 generator point, i.e. the public key of private key 1
    const GENERATOR_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_address_from_pubkey() {
        let pubkey = hex::decode(GENERATOR_UNCOMPRESSED).unwrap();
        let addr = EvmAddress::from_uncompressed_pubkey(&pubkey).unwrap();
        assert_eq!(
            addr.to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(addr.as_bytes()[0], 0x7e);
    }

    #[test]
    fn test_address_from_compressed_pubkey_rejected() {
        let pubkey = hex::decode(GENERATOR_UNCOMPRESSED).unwrap();
        let mut compressed = vec![0x02];
        compressed.extend_from_slice(&pubkey[1..33]);
        assert_eq!(
            EvmAddress::from_uncompressed_pubkey(&compressed),
            Err(AddressError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_parse_mixed_case_and_prefix() {
        let checksummed: EvmAddress = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".parse().unwrap();
        let bare = EvmAddress::parse("7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap();
        assert_eq!(checksummed, bare);
        assert_eq!(
            bare.to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_parse_invalid_length() {
        assert_eq!(
            EvmAddress::parse("0x1234"),
            Err(AddressError::InvalidLength { got: 4 })
        );
    }

    #[test]
    fn test_parse_invalid_hex() {
        let result = EvmAddress::parse("0xzz5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert!(matches!(result, Err(AddressError::InvalidHex(_))));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = EvmAddress::new([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let err = serde_json::from_str::<EvmAddress>("\"0xab\"").unwrap_err();
        assert!(err.to_string().contains("Invalid EVM address length"));
    }
}
