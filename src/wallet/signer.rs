//! Secure wallet key holder
//!
//! SECURITY: This is the ONLY place where private keys exist.
//! - Keys are held in alloy's PrivateKeySigner which handles crypto securely
//! - Keys are never serialized to JSON
//! - Keys are never logged

use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

/// Secure wallet that protects private keys
///
/// The private key is:
/// - Stored in alloy's PrivateKeySigner (handles crypto securely)
/// - Never serialized (no Serialize impl)
/// - Only reachable through the alloy `EthereumWallet` used to sign transactions
pub struct SecureWallet {
    /// Public address (safe to expose)
    address: Address,
    /// Ethereum wallet for alloy integration
    wallet: EthereumWallet,
}

impl SecureWallet {
    /// Create a wallet from an environment variable
    ///
    /// # Arguments
    /// * `var_name` - Name of the environment variable containing the private key
    pub fn from_env(var_name: &str) -> Result<Self> {
        let key_hex = std::env::var(var_name).map_err(|_| {
            Error::Wallet(format!(
                "Environment variable {} not set. Required for wallet initialization.",
                var_name
            ))
        })?;

        Self::from_hex(&key_hex)
    }

    /// Create a wallet from a hex-encoded private key
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| Error::Wallet(format!("Invalid private key: {}", e)))?;

        Ok(Self::from_signer(signer))
    }

    /// Create a wallet from a fresh random key
    pub fn random() -> Self {
        Self::from_signer(PrivateKeySigner::random())
    }

    fn from_signer(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self {
            address,
            wallet: EthereumWallet::from(signer),
        }
    }

    /// Get the public address (safe to share)
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get a reference to the EthereumWallet for use with alloy providers
    ///
    /// EthereumWallet only exposes signing operations, not the raw private key.
    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }
}

// Implement Debug manually to avoid exposing the signer
impl std::fmt::Debug for SecureWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureWallet")
            .field("address", &self.address)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}
