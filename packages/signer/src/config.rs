//! Signer configuration

use eyre::{eyre, Result};
use std::env;

use crate::signer::WithdrawalSigner;

/// Environment variable holding the hex-encoded signing key
pub const PRIVATE_KEY_VAR: &str = "SIGNER_PRIVATE_KEY";

/// Signer configuration
#[derive(Clone)]
pub struct Config {
    /// Hex private key of the withdrawal signer
    pub private_key: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {:?}", path);
        }

        Self::from_env()
    }

    /// Read configuration from the process environment only.
    pub fn from_env() -> Result<Self> {
        let private_key = env::var(PRIVATE_KEY_VAR)
            .map_err(|_| eyre!("{} required", PRIVATE_KEY_VAR))?
            .trim()
            .to_string();

        if private_key.is_empty() {
            return Err(eyre!("{} is empty", PRIVATE_KEY_VAR));
        }

        Ok(Self { private_key })
    }

    /// Build the signer, failing on a malformed key.
    pub fn signer(&self) -> Result<WithdrawalSigner> {
        WithdrawalSigner::from_private_key(&self.private_key)
            .map_err(|e| eyre!("Invalid {}: {}", PRIVATE_KEY_VAR, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEY_ONE: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    #[serial]
    fn test_missing_private_key() {
        env::remove_var(PRIVATE_KEY_VAR);
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SIGNER_PRIVATE_KEY required"));
    }

    #[test]
    #[serial]
    fn test_blank_private_key() {
        env::set_var(PRIVATE_KEY_VAR, "   ");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("empty"));
        env::remove_var(PRIVATE_KEY_VAR);
    }

    #[test]
    #[serial]
    fn test_loads_signer() {
        env::set_var(PRIVATE_KEY_VAR, format!(" {} ", KEY_ONE));
        let config = Config::from_env().unwrap();
        let signer = config.signer().unwrap();
        assert_eq!(
            signer.address().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert!(!format!("{:?}", config).contains(KEY_ONE));
        env::remove_var(PRIVATE_KEY_VAR);
    }

    #[test]
    #[serial]
    fn test_malformed_private_key() {
        env::set_var(PRIVATE_KEY_VAR, "0x1234");
        let config = Config::from_env().unwrap();
        assert!(config.signer().is_err());
        env::remove_var(PRIVATE_KEY_VAR);
    }
}
